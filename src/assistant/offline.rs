use chrono::NaiveDate;

use crate::core::idea::Idea;
use crate::core::project::ProjectStatus;
use crate::core::temporal::DueBuckets;
use crate::store::RecordStore;

/// Canned replies built from the current store. Used when no API key is
/// configured or the remote call fails.
pub fn respond(store: &RecordStore, message: &str, today: NaiveDate) -> String {
    let lower = message.to_lowercase();

    if lower.contains("inbox") || lower.contains("process") {
        return inbox_reply(store);
    }
    if lower.contains("task") || lower.contains("todo") || lower.contains("focus") {
        return task_reply(store, today);
    }
    if lower.contains("idea") {
        return idea_reply(store);
    }
    if lower.contains("project") {
        return project_reply(store);
    }
    if lower.contains("contact") || lower.contains("follow") || lower.contains("people") {
        return contact_reply(store, today);
    }

    format!(
        "I'm running offline right now, but here's a snapshot: {} new inbox items, {} open tasks, \
         {} ideas and {} contacts. Ask me about your inbox, tasks, ideas, projects or follow-ups.",
        store.inbox.iter().filter(|i| i.is_new()).count(),
        store.tasks.iter().filter(|t| !t.completed).count(),
        store.ideas.len(),
        store.contacts.len()
    )
}

fn inbox_reply(store: &RecordStore) -> String {
    let pending = store.inbox.iter().filter(|i| i.is_new()).count();
    if pending == 0 {
        return "Your inbox is clear. Capture anything on your mind and I'll help sort it.".into();
    }
    format!(
        "You have {} unprocessed inbox item{}. Go through them one at a time: \
         turn actionable ones into tasks, keep the interesting ones as ideas, and delete the rest.",
        pending,
        if pending == 1 { "" } else { "s" }
    )
}

fn task_reply(store: &RecordStore, today: NaiveDate) -> String {
    let open: Vec<_> = store.tasks.iter().filter(|t| !t.completed).collect();
    if open.is_empty() {
        return "No open tasks. A good moment to review your projects for next actions.".into();
    }
    let buckets = DueBuckets::build(&store.tasks, today);
    let mut reply = format!(
        "You have {} open task{} ({} overdue, {} due today).",
        open.len(),
        if open.len() == 1 { "" } else { "s" },
        buckets.overdue.len(),
        buckets.today.len()
    );
    let next = buckets
        .overdue
        .first()
        .or_else(|| buckets.today.first())
        .copied()
        .or_else(|| open.iter().max_by_key(|t| t.priority).copied());
    if let Some(task) = next {
        reply.push_str(&format!(" I'd start with \"{}\".", task.text));
    }
    reply
}

fn idea_reply(store: &RecordStore) -> String {
    let best: Option<&Idea> = store.ideas.iter().max_by_key(|i| i.potential);
    match best {
        None => "No ideas captured yet. Try starting a capture with \"what if\".".into(),
        Some(idea) => format!(
            "You have {} idea{}. Your highest rated is \"{}\" ({}/5). \
             Consider turning it into a project.",
            store.ideas.len(),
            if store.ideas.len() == 1 { "" } else { "s" },
            idea.text,
            idea.potential
        ),
    }
}

fn project_reply(store: &RecordStore) -> String {
    let active: Vec<_> = store
        .projects
        .iter()
        .filter(|p| p.status == ProjectStatus::Active)
        .collect();
    if active.is_empty() {
        return "No active projects. Pick one outcome you care about and give it a name.".into();
    }
    let lagging = active.iter().min_by_key(|p| p.progress);
    let plural = if active.len() == 1 { "" } else { "s" };
    let mut reply = format!("{} active project{}.", active.len(), plural);
    if let Some(p) = lagging {
        reply.push_str(&format!(
            " \"{}\" is furthest behind at {}%, so it may need a next action.",
            p.name, p.progress
        ));
    }
    reply
}

fn contact_reply(store: &RecordStore, today: NaiveDate) -> String {
    let due: Vec<&str> = store
        .contacts
        .iter()
        .filter(|c| c.needs_follow_up(today))
        .map(|c| c.name.as_str())
        .collect();
    if due.is_empty() {
        return "Nobody is waiting on a follow-up right now.".into();
    }
    format!("Time to follow up with: {}.", due.join(", "))
}
