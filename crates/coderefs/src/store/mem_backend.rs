use super::backend::StorageBackend;
use crate::error::{CodeRefsError, Result};
use crate::model::ReferenceRecord;
use std::cell::{Cell, RefCell};
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Keeps the serialized document text rather than the records so tests can plant
/// unparsable content and exercise the same decode path as the file backend.
/// Uses `RefCell` for interior mutability since the store is single-threaded.
#[derive(Default)]
pub struct MemBackend {
    document: RefCell<Option<String>>,
    simulate_write_error: Cell<bool>,
    saves: Cell<usize>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from raw document text, as if it had been read from disk.
    pub fn with_raw_document(raw: impl Into<String>) -> Self {
        let backend = Self::default();
        *backend.document.borrow_mut() = Some(raw.into());
        backend
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    pub fn raw_document(&self) -> Option<String> {
        self.document.borrow().clone()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl StorageBackend for MemBackend {
    fn load_records(&self) -> Result<Option<Vec<ReferenceRecord>>> {
        let document = self.document.borrow();
        match document.as_deref() {
            None => Ok(None),
            Some(raw) => {
                let records = serde_json::from_str(raw).map_err(CodeRefsError::Serialization)?;
                Ok(Some(records))
            }
        }
    }

    fn save_records(&self, records: &[ReferenceRecord]) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(CodeRefsError::Store("Simulated write error".to_string()));
        }
        let raw = serde_json::to_string_pretty(records).map_err(CodeRefsError::Serialization)?;
        *self.document.borrow_mut() = Some(raw);
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }

    fn location(&self) -> PathBuf {
        PathBuf::from("memory://references.json")
    }
}
