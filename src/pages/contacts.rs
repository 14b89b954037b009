use chrono::NaiveDate;

use crate::core::contact::Contact;
use crate::store::RecordStore;

fn last_contacted_text(contact: &Contact, today: NaiveDate) -> String {
    match contact.days_since_contact(today) {
        Some(0) => "contacted today".to_string(),
        Some(1) => "contacted yesterday".to_string(),
        Some(days) => format!("contacted {} days ago", days),
        None => "never contacted".to_string(),
    }
}

fn contact_card(contact: &Contact, today: NaiveDate) -> String {
    let mut card = format!("  {}  {}", contact.id.short(), contact.name);
    if contact.needs_follow_up(today) {
        card.push_str("  [follow up]");
    }
    card.push('\n');

    let mut meta: Vec<String> = Vec::new();
    if !contact.company.is_empty() {
        meta.push(contact.company.clone());
    }
    if !contact.relationship.is_empty() {
        meta.push(contact.relationship.clone());
    }
    meta.push(last_contacted_text(contact, today));
    card.push_str(&format!("    {}\n", meta.join(" · ")));

    for (label, value) in [("Email", &contact.email), ("Phone", &contact.phone)] {
        if !value.is_empty() {
            card.push_str(&format!("    {}: {}\n", label, value));
        }
    }
    if let Some(next) = contact.next_follow_up {
        card.push_str(&format!("    Next follow-up: {}\n", next.format("%Y-%m-%d")));
    }
    if !contact.notes.is_empty() {
        card.push_str(&format!("    {}\n", contact.notes));
    }
    card
}

/// Contacts due for a follow-up first, then alphabetical.
pub fn contacts_view(store: &RecordStore, today: NaiveDate) -> String {
    if store.contacts.is_empty() {
        return super::empty_line("contacts");
    }
    let mut sorted: Vec<&Contact> = store.contacts.iter().collect();
    sorted.sort_by(|a, b| {
        b.needs_follow_up(today)
            .cmp(&a.needs_follow_up(today))
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
    sorted.into_iter().map(|c| contact_card(c, today)).collect()
}
