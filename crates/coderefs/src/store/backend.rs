use crate::error::Result;
use crate::model::ReferenceRecord;
use std::path::PathBuf;

/// Abstract interface for raw document I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while ReferenceStore handles the "what" (ordering, mutation, degraded loads).
pub trait StorageBackend {
    /// Load the persisted record sequence.
    /// Returns Ok(None) if nothing has been persisted yet.
    /// Returns Err on I/O failure or when the document does not parse.
    fn load_records(&self) -> Result<Option<Vec<ReferenceRecord>>>;

    /// Replace the persisted document with `records`, in order.
    fn save_records(&self, records: &[ReferenceRecord]) -> Result<()>;

    /// Absolute location of the backing document.
    /// For JsonFileBackend this is the real path. For MemBackend, a virtual path.
    fn location(&self) -> PathBuf;
}
