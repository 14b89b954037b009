use chrono::NaiveDate;

use super::diagnostics::{Diagnostic, DiagnosticSink, LogSink};
use super::storage::Storage;
use super::RecordStore;

/// Loads and flushes the store. Neither direction ever fails the caller:
/// problems go to the diagnostic sink and the session carries on with
/// whatever is in memory.
pub struct Persistence {
    storage: Box<dyn Storage>,
    sink: Box<dyn DiagnosticSink>,
}

impl Persistence {
    pub fn new(storage: impl Storage + 'static) -> Self {
        Self::with_sink(storage, LogSink)
    }

    pub fn with_sink(storage: impl Storage + 'static, sink: impl DiagnosticSink + 'static) -> Self {
        Self {
            storage: Box::new(storage),
            sink: Box::new(sink),
        }
    }

    /// Always returns a structurally complete store.
    pub fn load(&self) -> RecordStore {
        let document = match self.storage.read() {
            Ok(Some(document)) => document,
            Ok(None) => {
                log::info!("No stored data yet, starting empty");
                return RecordStore::default();
            }
            Err(e) => {
                self.sink.report(Diagnostic::ReadFailed(e.to_string()));
                return RecordStore::default();
            }
        };

        match RecordStore::decode(&document) {
            Ok(decoded) => {
                if !decoded.invalid_fields.is_empty() {
                    self.sink
                        .report(Diagnostic::InvalidFields(decoded.invalid_fields));
                }
                let store = decoded.store;
                log::info!(
                    "Loaded store: {} inbox, {} tasks, {} projects, {} ideas, {} contacts",
                    store.inbox.len(),
                    store.tasks.len(),
                    store.projects.len(),
                    store.ideas.len(),
                    store.contacts.len()
                );
                store
            }
            Err(e) => {
                self.sink.report(Diagnostic::DecodeFailed(e.to_string()));
                RecordStore::default()
            }
        }
    }

    /// Flush the whole store. Failures are reported, not returned.
    pub fn save(&self, store: &RecordStore) {
        let document = match serde_json::to_string(store) {
            Ok(document) => document,
            Err(e) => {
                self.sink.report(Diagnostic::EncodeFailed(e.to_string()));
                return;
            }
        };
        match self.storage.write(&document) {
            Ok(()) => log::debug!("Saved store ({} bytes)", document.len()),
            Err(e) => self.sink.report(Diagnostic::WriteFailed(e.to_string())),
        }
    }
}

/// Suggested file name for an exported backup.
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("second-brain-backup-{}.json", date.format("%Y-%m-%d"))
}
