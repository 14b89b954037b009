use crate::core::inbox::{InboxItem, InboxStatus};
use crate::store::RecordStore;

fn inbox_line(item: &InboxItem) -> String {
    let marker = match item.status {
        InboxStatus::New => ' ',
        InboxStatus::Done => 'x',
    };
    let mut line = format!(
        "[{}] {}  {:<7} {}",
        marker,
        item.id.short(),
        item.item_type.as_str(),
        item.text
    );
    if !item.ai_summary.is_empty() {
        line.push_str(&format!("\n             summary: {}", item.ai_summary));
    }
    line
}

/// New items first, processed ones after.
pub fn inbox_view(store: &RecordStore) -> String {
    if store.inbox.is_empty() {
        return "  Inbox zero. Capture a thought with `capture <text>`.\n".to_string();
    }

    let mut out = String::new();
    let (pending, processed): (Vec<&InboxItem>, Vec<&InboxItem>) =
        store.inbox.iter().partition(|i| i.is_new());

    for item in pending.iter().chain(processed.iter()) {
        out.push_str(&format!("  {}\n", inbox_line(item)));
    }
    out.push_str(&format!(
        "\n  {} new, {} processed. Convert with `to-task <id>` or `to-idea <id>`.\n",
        pending.len(),
        processed.len()
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_items_are_listed_first() {
        let mut store = RecordStore::default();
        let mut done = InboxItem::capture("finished thing").unwrap();
        done.mark_done();
        store.inbox = vec![done, InboxItem::capture("fresh thing").unwrap()];

        let view = inbox_view(&store);
        let fresh = view.find("fresh thing").unwrap();
        let finished = view.find("finished thing").unwrap();
        assert!(fresh < finished);
        assert!(view.contains("1 new, 1 processed"));
    }

    #[test]
    fn summary_is_shown_when_present() {
        let mut store = RecordStore::default();
        let mut item = InboxItem::capture("long").unwrap();
        item.ai_summary = "short version...".into();
        store.inbox.push(item);
        assert!(inbox_view(&store).contains("summary: short version..."));
    }
}
