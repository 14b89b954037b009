//! Moving inbox items into typed collections.
//!
//! A conversion builds a fresh record (new id, new timestamp) from the inbox
//! text, appends it to the destination, and drops the inbox item. Nothing
//! else from the inbox item carries over. An unknown id changes nothing.

use crate::store::RecordStore;

use super::idea::Idea;
use super::record::RecordId;
use super::task::Task;

fn take_inbox_text(store: &mut RecordStore, inbox_id: &RecordId) -> Option<String> {
    let idx = store.inbox.iter().position(|item| &item.id == inbox_id)?;
    Some(store.inbox.remove(idx).text)
}

/// Returns the id of the new task, or `None` if the inbox item was not found.
pub fn convert_to_task(store: &mut RecordStore, inbox_id: &RecordId) -> Option<RecordId> {
    let text = take_inbox_text(store, inbox_id)?;
    let task = Task::new(text);
    let id = task.id.clone();
    store.tasks.push(task);
    Some(id)
}

/// Returns the id of the new idea, or `None` if the inbox item was not found.
pub fn convert_to_idea(store: &mut RecordStore, inbox_id: &RecordId) -> Option<RecordId> {
    let text = take_inbox_text(store, inbox_id)?;
    let idea = Idea::new(text);
    let id = idea.id.clone();
    store.ideas.push(idea);
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::idea::IdeaStatus;
    use crate::core::inbox::InboxItem;
    use crate::core::task::Priority;

    fn store_with(texts: &[&str]) -> RecordStore {
        let mut store = RecordStore::default();
        for t in texts {
            store.inbox.push(InboxItem::capture(t).unwrap());
        }
        store
    }

    #[test]
    fn task_conversion_moves_the_record() {
        let mut store = store_with(&["need to renew passport", "other"]);
        let source = store.inbox[0].clone();

        let new_id = convert_to_task(&mut store, &source.id).unwrap();

        assert_eq!(store.inbox.len(), 1);
        assert_eq!(store.tasks.len(), 1);
        let task = &store.tasks[0];
        assert_eq!(task.id, new_id);
        assert_ne!(task.id, source.id);
        assert_eq!(task.text, source.text);
        assert!(!task.completed);
        assert_eq!(task.priority, Priority::Medium);
        assert!(task.due_date.is_none());
        assert!(task.project.is_none());
        assert!(task.context.is_empty());
    }

    #[test]
    fn idea_conversion_uses_idea_defaults() {
        let mut store = store_with(&["what if we had a garden"]);
        let source_id = store.inbox[0].id.clone();

        convert_to_idea(&mut store, &source_id).unwrap();

        assert!(store.inbox.is_empty());
        let idea = &store.ideas[0];
        assert_eq!(idea.text, "what if we had a garden");
        assert_eq!(idea.category, "general");
        assert_eq!(idea.potential, 2);
        assert_eq!(idea.status, IdeaStatus::New);
        assert_ne!(idea.id, source_id);
    }

    #[test]
    fn unknown_id_is_a_no_op() {
        let mut store = store_with(&["keep me"]);
        let before = store.clone();
        assert!(convert_to_task(&mut store, &RecordId::from("missing")).is_none());
        assert!(convert_to_idea(&mut store, &RecordId::from("missing")).is_none());
        assert_eq!(store, before);
    }
}
