use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A single persisted slot holding the whole store document.
pub trait Storage: Send + Sync {
    /// `Ok(None)` when nothing has been stored yet.
    fn read(&self) -> Result<Option<String>, StorageError>;
    fn write(&self, document: &str) -> Result<(), StorageError>;
}

/// Stores the document in one file, creating the parent directory on write.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Storage for FileStorage {
    fn read(&self) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn write(&self, document: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }
        // A failed write must leave the previous document in place.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, document).map_err(|e| self.io_error(e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))
    }
}

/// In-memory slot. Clones share the same contents, so a test can keep a
/// handle after giving one away.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Option<String>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(document: impl Into<String>) -> Self {
        let storage = Self::default();
        storage.set_contents(document);
        storage
    }

    pub fn contents(&self) -> Option<String> {
        match self.slot.lock() {
            Ok(slot) => slot.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn set_contents(&self, document: impl Into<String>) {
        match self.slot.lock() {
            Ok(mut slot) => *slot = Some(document.into()),
            Err(poisoned) => *poisoned.into_inner() = Some(document.into()),
        }
    }

    /// Make every later write fail, as a full quota would.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }
}

impl Storage for MemoryStorage {
    fn read(&self) -> Result<Option<String>, StorageError> {
        Ok(self.contents())
    }

    fn write(&self, document: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(StorageError::Unavailable("quota exceeded".into()));
        }
        self.set_contents(document);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_storage_reads_none_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("store.json"));
        assert!(storage.read().unwrap().is_none());
    }

    #[test]
    fn file_storage_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested").join("store.json"));
        storage.write("{\"inbox\": []}").unwrap();
        assert_eq!(storage.read().unwrap().as_deref(), Some("{\"inbox\": []}"));
        assert!(!dir.path().join("nested").join("store.json.tmp").exists());
    }

    #[test]
    fn memory_storage_can_fail_writes() {
        let storage = MemoryStorage::with_contents("old");
        storage.set_fail_writes(true);
        assert!(storage.write("new").is_err());
        assert_eq!(storage.contents().as_deref(), Some("old"));
        storage.set_fail_writes(false);
        storage.write("new").unwrap();
        assert_eq!(storage.contents().as_deref(), Some("new"));
    }
}
