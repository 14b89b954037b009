//! The record store: five collections plus settings, held in memory for the
//! session and persisted as one JSON document.

pub mod diagnostics;
pub mod persistence;
pub mod storage;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::contact::Contact;
use crate::core::idea::Idea;
use crate::core::inbox::InboxItem;
use crate::core::project::Project;
use crate::core::record::RecordId;
use crate::core::task::Task;

pub use diagnostics::{Diagnostic, DiagnosticSink, LogSink, MemorySink};
pub use persistence::{Persistence, backup_file_name};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub dark_mode: bool,
    #[serde(default)]
    pub api_key: String,
    /// Keys written by other versions, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecordStore {
    pub inbox: Vec<InboxItem>,
    pub tasks: Vec<Task>,
    pub projects: Vec<Project>,
    pub ideas: Vec<Idea>,
    pub contacts: Vec<Contact>,
    pub settings: Settings,
    /// Unknown top-level keys, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Inbox,
    Tasks,
    Projects,
    Ideas,
    Contacts,
}

impl Collection {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Inbox => "inbox",
            Self::Tasks => "tasks",
            Self::Projects => "projects",
            Self::Ideas => "ideas",
            Self::Contacts => "contacts",
        }
    }
}

/// Top-level key holding values that failed to decode, grouped by the key
/// they were found under. They are written back untouched on every save.
pub const QUARANTINE_KEY: &str = "quarantine";

/// A decoded document. `invalid_fields` names what did not match its schema:
/// a whole key (`settings`, `ideas`) or a single record (`tasks[2]`). Each of
/// those values was moved under [`QUARANTINE_KEY`] and everything else was
/// kept.
#[derive(Debug)]
pub struct Decoded {
    pub store: RecordStore,
    pub invalid_fields: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("expected a JSON object at the top level")]
    NotAnObject,
    #[error("invalid fields: {}", .0.join(", "))]
    InvalidFields(Vec<String>),
}

impl RecordStore {
    /// Decode a stored or imported document, merging it over defaults.
    /// Collections are decoded record by record, so one bad record never
    /// costs its neighbours.
    pub fn decode(document: &str) -> Result<Decoded, ImportError> {
        let value: Value = serde_json::from_str(document)?;
        let Value::Object(map) = value else {
            return Err(ImportError::NotAnObject);
        };

        let mut decoder = Decoder {
            map,
            invalid_fields: Vec::new(),
            rejected: Vec::new(),
        };
        let inbox = decoder.records(Collection::Inbox.key());
        let tasks = decoder.records(Collection::Tasks.key());
        let projects = decoder.records(Collection::Projects.key());
        let ideas = decoder.records(Collection::Ideas.key());
        let contacts = decoder.records(Collection::Contacts.key());
        let settings = decoder.field("settings");

        let Decoder {
            map: mut extra,
            invalid_fields,
            rejected,
        } = decoder;
        for (key, value) in rejected {
            quarantine(&mut extra, &key, value);
        }

        Ok(Decoded {
            store: RecordStore {
                inbox,
                tasks,
                projects,
                ideas,
                contacts,
                settings,
                extra,
            },
            invalid_fields,
        })
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn len(&self, collection: Collection) -> usize {
        match collection {
            Collection::Inbox => self.inbox.len(),
            Collection::Tasks => self.tasks.len(),
            Collection::Projects => self.projects.len(),
            Collection::Ideas => self.ideas.len(),
            Collection::Contacts => self.contacts.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.inbox.is_empty()
            && self.tasks.is_empty()
            && self.projects.is_empty()
            && self.ideas.is_empty()
            && self.contacts.is_empty()
    }

    fn ids(&self, collection: Collection) -> Vec<&RecordId> {
        match collection {
            Collection::Inbox => self.inbox.iter().map(|r| &r.id).collect(),
            Collection::Tasks => self.tasks.iter().map(|r| &r.id).collect(),
            Collection::Projects => self.projects.iter().map(|r| &r.id).collect(),
            Collection::Ideas => self.ideas.iter().map(|r| &r.id).collect(),
            Collection::Contacts => self.contacts.iter().map(|r| &r.id).collect(),
        }
    }

    /// Resolve a full id or an unambiguous id prefix within one collection.
    pub fn resolve_id(&self, collection: Collection, needle: &str) -> Option<RecordId> {
        let needle = needle.trim();
        if needle.is_empty() {
            return None;
        }
        let ids = self.ids(collection);
        if let Some(exact) = ids.iter().find(|id| id.as_str() == needle) {
            return Some((*exact).clone());
        }
        let mut matches = ids.into_iter().filter(|id| id.as_str().starts_with(needle));
        match (matches.next(), matches.next()) {
            (Some(only), None) => Some(only.clone()),
            _ => None,
        }
    }

    pub fn inbox_item_mut(&mut self, id: &RecordId) -> Option<&mut InboxItem> {
        self.inbox.iter_mut().find(|r| &r.id == id)
    }

    pub fn task_mut(&mut self, id: &RecordId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|r| &r.id == id)
    }

    pub fn project_mut(&mut self, id: &RecordId) -> Option<&mut Project> {
        self.projects.iter_mut().find(|r| &r.id == id)
    }

    pub fn idea_mut(&mut self, id: &RecordId) -> Option<&mut Idea> {
        self.ideas.iter_mut().find(|r| &r.id == id)
    }

    pub fn contact_mut(&mut self, id: &RecordId) -> Option<&mut Contact> {
        self.contacts.iter_mut().find(|r| &r.id == id)
    }

    /// Remove a record by id. Returns false when nothing matched.
    pub fn remove(&mut self, collection: Collection, id: &RecordId) -> bool {
        fn remove_from<T>(items: &mut Vec<T>, matches: impl Fn(&T) -> bool) -> bool {
            let before = items.len();
            items.retain(|r| !matches(r));
            items.len() != before
        }

        match collection {
            Collection::Inbox => remove_from(&mut self.inbox, |r| &r.id == id),
            Collection::Tasks => remove_from(&mut self.tasks, |r| &r.id == id),
            Collection::Projects => remove_from(&mut self.projects, |r| &r.id == id),
            Collection::Ideas => remove_from(&mut self.ideas, |r| &r.id == id),
            Collection::Contacts => remove_from(&mut self.contacts, |r| &r.id == id),
        }
    }

    /// Recompute each project's task count from tasks that name it.
    pub fn refresh_project_task_counts(&mut self) {
        for project in &mut self.projects {
            project.tasks = project.count_tasks(&self.tasks);
        }
    }
}

struct Decoder {
    map: Map<String, Value>,
    invalid_fields: Vec<String>,
    rejected: Vec<(String, Value)>,
}

impl Decoder {
    fn records<T: DeserializeOwned>(&mut self, key: &str) -> Vec<T> {
        match self.map.remove(key) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => {
                let mut records = Vec::with_capacity(items.len());
                for (index, item) in items.into_iter().enumerate() {
                    match T::deserialize(&item) {
                        Ok(record) => records.push(record),
                        Err(e) => {
                            log::debug!(
                                "Record {}[{}] did not match its schema: {}",
                                key,
                                index,
                                e
                            );
                            self.reject(format!("{}[{}]", key, index), key, item);
                        }
                    }
                }
                records
            }
            Some(other) => {
                log::debug!("Field `{}` is not a list", key);
                self.reject(key.to_string(), key, other);
                Vec::new()
            }
        }
    }

    fn field<T: DeserializeOwned + Default>(&mut self, key: &str) -> T {
        match self.map.remove(key) {
            None | Some(Value::Null) => T::default(),
            Some(value) => match T::deserialize(&value) {
                Ok(parsed) => parsed,
                Err(e) => {
                    log::debug!("Field `{}` did not match its schema: {}", key, e);
                    self.reject(key.to_string(), key, value);
                    T::default()
                }
            },
        }
    }

    fn reject(&mut self, name: String, key: &str, value: Value) {
        self.invalid_fields.push(name);
        self.rejected.push((key.to_string(), value));
    }
}

/// Append `value` to `extra[QUARANTINE_KEY][key]`, keeping anything already
/// parked there.
fn quarantine(extra: &mut Map<String, Value>, key: &str, value: Value) {
    let slot = extra
        .entry(QUARANTINE_KEY)
        .or_insert_with(|| Value::Object(Map::new()));
    if !slot.is_object() {
        let previous = slot.take();
        *slot = serde_json::json!({ "previous": [previous] });
    }
    if let Value::Object(parked) = slot {
        match parked
            .entry(key)
            .or_insert_with(|| Value::Array(Vec::new()))
        {
            Value::Array(items) => items.push(value),
            other => {
                let previous = other.take();
                *other = Value::Array(vec![previous, value]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_decodes_to_defaults() {
        let decoded = RecordStore::decode("{}").unwrap();
        assert_eq!(decoded.store, RecordStore::default());
        assert!(decoded.invalid_fields.is_empty());
    }

    #[test]
    fn partial_document_merges_over_defaults() {
        let doc =
            r#"{"tasks": [{"id": "t1", "text": "File taxes"}], "settings": {"darkMode": true}}"#;
        let decoded = RecordStore::decode(doc).unwrap();
        assert_eq!(decoded.store.tasks.len(), 1);
        assert!(decoded.store.inbox.is_empty());
        assert!(decoded.store.settings.dark_mode);
        assert!(decoded.store.settings.api_key.is_empty());
    }

    #[test]
    fn unknown_keys_survive_a_round_trip() {
        let doc = r#"{"inbox": [], "habits": [1, 2], "settings": {"fontSize": 14}}"#;
        let store = RecordStore::decode(doc).unwrap().store;
        let out: Value = serde_json::from_str(&store.to_json_pretty().unwrap()).unwrap();
        assert_eq!(out["habits"], serde_json::json!([1, 2]));
        assert_eq!(out["settings"]["fontSize"], 14);
        assert_eq!(out["settings"]["darkMode"], false);
        assert!(out["contacts"].as_array().unwrap().is_empty());
    }

    #[test]
    fn mismatched_collection_is_reported_and_quarantined() {
        let doc = r#"{"ideas": "not a list", "tasks": [{"id": "t1", "text": "x"}]}"#;
        let decoded = RecordStore::decode(doc).unwrap();
        assert_eq!(decoded.invalid_fields, vec!["ideas".to_string()]);
        assert!(decoded.store.ideas.is_empty());
        assert_eq!(decoded.store.tasks.len(), 1);
        assert_eq!(
            decoded.store.extra[QUARANTINE_KEY]["ideas"],
            serde_json::json!(["not a list"])
        );
    }

    #[test]
    fn one_bad_record_keeps_its_neighbours() {
        let doc = r#"{"tasks": [
            {"id": "t1", "text": "File taxes"},
            {"id": "t2", "text": "Pay rent"},
            {"id": "t3", "text": "Legacy", "priority": "urgent"}
        ], "ideas": [{"id": 1.5, "text": "float id"}, {"id": "i2", "text": "fine"}]}"#;
        let decoded = RecordStore::decode(doc).unwrap();

        assert_eq!(decoded.invalid_fields, vec!["tasks[2]", "ideas[0]"]);
        let texts: Vec<_> = decoded.store.tasks.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["File taxes", "Pay rent"]);
        assert_eq!(decoded.store.ideas.len(), 1);

        let parked = &decoded.store.extra[QUARANTINE_KEY];
        assert_eq!(parked["tasks"][0]["priority"], "urgent");
        assert_eq!(parked["ideas"][0]["id"], 1.5);
    }

    #[test]
    fn quarantined_records_accumulate_across_loads() {
        let stored = r#"{"tasks": [{"id": "a", "text": "x", "priority": "urgent"}]}"#;
        let first = RecordStore::decode(stored).unwrap().store;
        let mut doc: Value = serde_json::from_str(&first.to_json_pretty().unwrap()).unwrap();
        doc["tasks"] = serde_json::json!([{"id": "b", "text": "y", "completed": "no"}]);

        let second = RecordStore::decode(&doc.to_string()).unwrap();
        assert_eq!(second.invalid_fields, vec!["tasks[0]"]);
        let parked = second.store.extra[QUARANTINE_KEY]["tasks"].as_array().unwrap();
        assert_eq!(parked.len(), 2);
        assert_eq!(parked[0]["id"], "a");
        assert_eq!(parked[1]["id"], "b");
    }

    #[test]
    fn non_object_documents_are_rejected() {
        assert!(matches!(
            RecordStore::decode("[1, 2]"),
            Err(ImportError::NotAnObject)
        ));
        assert!(matches!(
            RecordStore::decode("{not json"),
            Err(ImportError::InvalidJson(_))
        ));
    }

    #[test]
    fn resolve_id_by_prefix() {
        let mut store = RecordStore::default();
        let mut a = Task::new("a");
        a.id = RecordId::from("abc123");
        let mut b = Task::new("b");
        b.id = RecordId::from("abd456");
        store.tasks = vec![a, b];

        assert_eq!(
            store.resolve_id(Collection::Tasks, "abc"),
            Some(RecordId::from("abc123"))
        );
        assert_eq!(store.resolve_id(Collection::Tasks, "ab"), None);
        assert_eq!(store.resolve_id(Collection::Tasks, "zzz"), None);
        assert_eq!(store.resolve_id(Collection::Inbox, "abc"), None);
    }

    #[test]
    fn remove_reports_whether_anything_matched() {
        let mut store = RecordStore::default();
        let idea = Idea::new("x");
        let id = idea.id.clone();
        store.ideas.push(idea);
        assert!(store.remove(Collection::Ideas, &id));
        assert!(!store.remove(Collection::Ideas, &id));
        assert_eq!(store.len(Collection::Ideas), 0);
    }

    #[test]
    fn project_task_counts_follow_task_names() {
        let mut store = RecordStore::default();
        store.projects.push(Project::new("Move", ""));
        let mut t = Task::new("Pack books");
        t.project = Some("Move".into());
        store.tasks.push(t);
        store.refresh_project_task_counts();
        assert_eq!(store.projects[0].tasks, 1);
    }
}
