//! The session: one in-memory store, loaded once and flushed after every
//! mutating operation.

use chrono::{Local, NaiveDate};

use crate::core::classify::classify_item;
use crate::core::contact::Contact;
use crate::core::convert;
use crate::core::idea::Idea;
use crate::core::inbox::{InboxItem, ItemType};
use crate::core::project::{Project, ProjectStatus};
use crate::core::record::RecordId;
use crate::core::task::{Priority, Task};
use crate::store::{Collection, ImportError, Persistence, RecordStore};

/// Fields for a new task beyond its text.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    pub project: Option<String>,
    pub context: Vec<String>,
}

/// Fields for a new contact beyond its name.
#[derive(Debug, Clone, Default)]
pub struct NewContact {
    pub company: String,
    pub relationship: String,
    pub email: String,
    pub phone: String,
    pub next_follow_up: Option<NaiveDate>,
    pub notes: String,
}

pub struct SecondBrain {
    store: RecordStore,
    persistence: Persistence,
}

impl SecondBrain {
    pub fn open(persistence: Persistence) -> Self {
        let store = persistence.load();
        Self { store, persistence }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    fn save(&self) {
        self.persistence.save(&self.store);
    }

    /// Swap in a whole new store and flush it.
    pub fn replace(&mut self, store: RecordStore) {
        self.store = store;
        self.save();
    }

    pub fn resolve(&self, collection: Collection, needle: &str) -> Option<RecordId> {
        self.store.resolve_id(collection, needle)
    }

    // Inbox

    /// Capture text into the inbox and classify it. Blank text is ignored.
    pub fn capture(&mut self, text: &str) -> Option<RecordId> {
        let mut item = InboxItem::capture(text)?;
        let item_type = classify_item(&mut item);
        let id = item.id.clone();
        log::info!("Captured inbox item as {}", item_type.as_str());
        self.store.inbox.insert(0, item);
        self.save();
        Some(id)
    }

    /// Re-run the classifier on an inbox item.
    pub fn classify_inbox_item(&mut self, id: &RecordId) -> Option<ItemType> {
        let item = self.store.inbox_item_mut(id)?;
        let item_type = classify_item(item);
        self.save();
        Some(item_type)
    }

    pub fn mark_inbox_done(&mut self, id: &RecordId) -> bool {
        let Some(item) = self.store.inbox_item_mut(id) else {
            return false;
        };
        item.mark_done();
        self.save();
        true
    }

    pub fn delete_inbox_item(&mut self, id: &RecordId) -> bool {
        self.remove(Collection::Inbox, id)
    }

    pub fn convert_to_task(&mut self, inbox_id: &RecordId) -> Option<RecordId> {
        let id = convert::convert_to_task(&mut self.store, inbox_id)?;
        log::info!("Converted inbox item {} to task {}", inbox_id, id);
        self.save();
        Some(id)
    }

    pub fn convert_to_idea(&mut self, inbox_id: &RecordId) -> Option<RecordId> {
        let id = convert::convert_to_idea(&mut self.store, inbox_id)?;
        log::info!("Converted inbox item {} to idea {}", inbox_id, id);
        self.save();
        Some(id)
    }

    // Tasks

    pub fn add_task(&mut self, text: &str, fields: NewTask) -> Option<RecordId> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let mut task = Task::new(text);
        task.priority = fields.priority;
        task.due_date = fields.due_date;
        task.project = fields
            .project
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());
        task.context = fields
            .context
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        let id = task.id.clone();
        self.store.tasks.push(task);
        self.store.refresh_project_task_counts();
        self.save();
        Some(id)
    }

    /// Flip completion. Returns the new completed state.
    pub fn toggle_task(&mut self, id: &RecordId) -> Option<bool> {
        let task = self.store.task_mut(id)?;
        task.toggle();
        let completed = task.completed;
        self.save();
        Some(completed)
    }

    pub fn delete_task(&mut self, id: &RecordId) -> bool {
        let removed = self.store.remove(Collection::Tasks, id);
        if removed {
            self.store.refresh_project_task_counts();
            self.save();
        }
        removed
    }

    // Projects

    pub fn add_project(&mut self, name: &str, description: &str) -> Option<RecordId> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let mut project = Project::new(name, description.trim());
        project.tasks = project.count_tasks(&self.store.tasks);
        let id = project.id.clone();
        self.store.projects.push(project);
        self.save();
        Some(id)
    }

    pub fn set_project_progress(&mut self, id: &RecordId, percent: i64) -> Option<u8> {
        let project = self.store.project_mut(id)?;
        project.set_progress(percent);
        let progress = project.progress;
        self.save();
        Some(progress)
    }

    pub fn set_project_status(&mut self, id: &RecordId, status: ProjectStatus) -> bool {
        let Some(project) = self.store.project_mut(id) else {
            return false;
        };
        project.status = status;
        self.save();
        true
    }

    pub fn delete_project(&mut self, id: &RecordId) -> bool {
        self.remove(Collection::Projects, id)
    }

    // Ideas

    pub fn add_idea(&mut self, text: &str, category: Option<&str>) -> Option<RecordId> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let mut idea = Idea::new(text);
        if let Some(category) = category.map(str::trim).filter(|c| !c.is_empty()) {
            idea.category = category.to_string();
        }
        let id = idea.id.clone();
        self.store.ideas.push(idea);
        self.save();
        Some(id)
    }

    pub fn rate_idea(&mut self, id: &RecordId, potential: i64) -> Option<u8> {
        let idea = self.store.idea_mut(id)?;
        idea.rate(potential);
        let potential = idea.potential;
        self.save();
        Some(potential)
    }

    pub fn delete_idea(&mut self, id: &RecordId) -> bool {
        self.remove(Collection::Ideas, id)
    }

    // Contacts

    pub fn add_contact(&mut self, name: &str, fields: NewContact) -> Option<RecordId> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let mut contact = Contact::new(name);
        contact.company = fields.company;
        contact.relationship = fields.relationship;
        contact.email = fields.email;
        contact.phone = fields.phone;
        contact.next_follow_up = fields.next_follow_up;
        contact.notes = fields.notes;
        let id = contact.id.clone();
        self.store.contacts.push(contact);
        self.save();
        Some(id)
    }

    /// Record that the contact was reached on `day`.
    pub fn log_contact(&mut self, id: &RecordId, day: NaiveDate) -> bool {
        let Some(contact) = self.store.contact_mut(id) else {
            return false;
        };
        contact.last_contact = Some(day);
        self.save();
        true
    }

    pub fn set_follow_up(&mut self, id: &RecordId, day: Option<NaiveDate>) -> bool {
        let Some(contact) = self.store.contact_mut(id) else {
            return false;
        };
        contact.next_follow_up = day;
        self.save();
        true
    }

    pub fn delete_contact(&mut self, id: &RecordId) -> bool {
        self.remove(Collection::Contacts, id)
    }

    // Settings

    pub fn set_dark_mode(&mut self, enabled: bool) {
        self.store.settings.dark_mode = enabled;
        self.save();
    }

    pub fn set_api_key(&mut self, key: &str) {
        self.store.settings.api_key = key.trim().to_string();
        self.save();
    }

    // Import / export

    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        self.store.to_json_pretty()
    }

    /// Replace the store with an imported document. On any error the current
    /// store is left as it was.
    pub fn import_json(&mut self, document: &str) -> Result<(), ImportError> {
        let decoded = RecordStore::decode(document)?;
        if !decoded.invalid_fields.is_empty() {
            return Err(ImportError::InvalidFields(decoded.invalid_fields));
        }
        log::info!("Importing store document ({} bytes)", document.len());
        self.replace(decoded.store);
        Ok(())
    }

    /// Drop everything, settings included.
    pub fn clear_all(&mut self) {
        log::info!("Clearing all data");
        self.replace(RecordStore::default());
    }

    fn remove(&mut self, collection: Collection, id: &RecordId) -> bool {
        let removed = self.store.remove(collection, id);
        if removed {
            self.save();
        }
        removed
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
