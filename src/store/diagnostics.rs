use std::sync::{Arc, Mutex};

/// Something went wrong while persisting the store. These never reach the
/// caller as errors; they are reported to a [`DiagnosticSink`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    ReadFailed(String),
    DecodeFailed(String),
    InvalidFields(Vec<String>),
    EncodeFailed(String),
    WriteFailed(String),
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReadFailed(e) => write!(f, "Failed to read store: {}", e),
            Self::DecodeFailed(e) => write!(f, "Stored data is corrupt, using defaults: {}", e),
            Self::InvalidFields(fields) => {
                write!(f, "Quarantined invalid stored data: {}", fields.join(", "))
            }
            Self::EncodeFailed(e) => write!(f, "Failed to serialize store: {}", e),
            Self::WriteFailed(e) => write!(f, "Failed to save store: {}", e),
        }
    }
}

pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, diagnostic: Diagnostic) {
        match diagnostic {
            Diagnostic::EncodeFailed(_) | Diagnostic::WriteFailed(_) => {
                log::error!("{}", diagnostic)
            }
            _ => log::warn!("{}", diagnostic),
        }
    }
}

/// Keeps every diagnostic in memory. Clones share the same buffer.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    entries: Arc<Mutex<Vec<Diagnostic>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Diagnostic> {
        match self.entries.lock() {
            Ok(entries) => entries.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

impl DiagnosticSink for MemorySink {
    fn report(&self, diagnostic: Diagnostic) {
        match self.entries.lock() {
            Ok(mut entries) => entries.push(diagnostic),
            Err(poisoned) => poisoned.into_inner().push(diagnostic),
        }
    }
}
