use super::backend::StorageBackend;
use super::{Durability, LoadOutcome, StoreUpdate};
use crate::model::{ReferenceKind, ReferenceRecord};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// The ordered reference collection, mirrored to a storage backend.
///
/// Owned by the hosting session and handed to whoever needs it; there is no
/// global instance. Every mutation rewrites the full document.
pub struct ReferenceStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    records: Vec<ReferenceRecord>,
}

impl<B: StorageBackend> ReferenceStore<B> {
    /// Opens the store, loading whatever the backend holds.
    /// A missing or unreadable document yields an empty store; the outcome says which.
    pub fn open(backend: B) -> (Self, LoadOutcome) {
        let mut store = Self {
            backend,
            records: Vec::new(),
        };
        let outcome = store.reload();
        (store, outcome)
    }

    /// Re-reads the backing document, replacing the in-memory records.
    pub fn reload(&mut self) -> LoadOutcome {
        let location = self.backend.location();
        match self.backend.load_records() {
            Ok(Some(records)) => {
                info!(
                    count = records.len(),
                    "Loaded references from {}",
                    location.display()
                );
                let count = records.len();
                self.records = records;
                LoadOutcome::Loaded(count)
            }
            Ok(None) => {
                debug!("No reference file at {}, starting empty", location.display());
                self.records.clear();
                LoadOutcome::Missing
            }
            Err(e) => {
                // The unreadable file is left alone until the next save overwrites it.
                warn!(
                    "Discarding unreadable reference file {}: {e}",
                    location.display()
                );
                self.records.clear();
                LoadOutcome::Discarded(e)
            }
        }
    }

    /// Appends a new record. Duplicates of existing content are allowed.
    pub fn add(
        &mut self,
        kind: ReferenceKind,
        title: String,
        file_path: Option<String>,
        snippet: Option<String>,
    ) -> StoreUpdate<ReferenceRecord> {
        let record = ReferenceRecord::new(kind, title, file_path, snippet);
        debug!(id = %record.id, kind = %record.kind, "Adding reference");
        self.records.push(record.clone());
        StoreUpdate::new(record, self.persist())
    }

    /// Snapshot of the records in current order.
    pub fn list(&self) -> Vec<ReferenceRecord> {
        self.records.clone()
    }

    pub fn get(&self, id: &str) -> Option<&ReferenceRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Moves the named records to the front in the given order.
    ///
    /// Unknown and repeated ids are skipped. Records the request does not name keep
    /// their relative order after the named ones, so a stale or partial request
    /// never drops anything.
    pub fn reorder<I: AsRef<str>>(&mut self, ids: &[I]) -> StoreUpdate<()> {
        let mut remaining: Vec<Option<ReferenceRecord>> =
            std::mem::take(&mut self.records).into_iter().map(Some).collect();
        let mut ordered = Vec::with_capacity(remaining.len());

        for id in ids {
            let id = id.as_ref();
            let found = remaining.iter_mut().find_map(|slot| {
                if slot.as_ref().is_some_and(|r| r.id == id) {
                    slot.take()
                } else {
                    None
                }
            });
            match found {
                Some(record) => ordered.push(record),
                None => debug!(id, "Reorder skipped unknown id"),
            }
        }
        ordered.extend(remaining.into_iter().flatten());
        self.records = ordered;

        StoreUpdate::new((), self.persist())
    }

    /// Removes the record with `id`. Unknown ids are a no-op, not an error.
    /// The value reports whether anything was removed.
    pub fn delete(&mut self, id: &str) -> StoreUpdate<bool> {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        let removed = self.records.len() != before;
        if !removed {
            debug!(id, "Delete of unknown reference ignored");
        }
        StoreUpdate::new(removed, self.persist())
    }

    /// Sets a new title and refreshes `updated_at`. Unknown ids are a no-op.
    /// The value is the renamed record, if one matched.
    pub fn rename(&mut self, id: &str, title: String) -> StoreUpdate<Option<ReferenceRecord>> {
        let renamed = self.records.iter_mut().find(|r| r.id == id).map(|record| {
            record.rename(title);
            record.clone()
        });
        if renamed.is_none() {
            debug!(id, "Rename of unknown reference ignored");
        }
        StoreUpdate::new(renamed, self.persist())
    }

    /// Absolute path of the backing document. No side effects.
    pub fn storage_location(&self) -> PathBuf {
        self.backend.location()
    }

    fn persist(&self) -> Durability {
        match self.backend.save_records(&self.records) {
            Ok(()) => Durability::Saved,
            Err(e) => {
                warn!(
                    "Failed to save references to {}: {e}",
                    self.backend.location().display()
                );
                Durability::Unsaved(e)
            }
        }
    }
}
