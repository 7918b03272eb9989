//! # Storage Layer
//!
//! This module owns the ordered reference collection and its persistence.
//!
//! ## One Document, Rewritten Whole
//!
//! The collection lives in memory inside a [`reference_store::ReferenceStore`] and is
//! mirrored to a single JSON document: an array of record objects, in display order.
//!
//! - **Load** happens once when the store is opened (and again on `reload`).
//! - **Save** happens after every mutation (add, delete, rename, reorder) and writes
//!   the entire array. No diffing, no journal, no transactions.
//!
//! ## Degraded Paths Are Values
//!
//! Neither loading nor saving can make a store operation fail:
//!
//! - A missing document opens as an empty store ([`LoadOutcome::Missing`]).
//! - A document that cannot be read or parsed is logged and discarded
//!   ([`LoadOutcome::Discarded`]). The file itself is left in place and is replaced by
//!   the next successful save. There is no schema migration: an incompatible document
//!   is treated the same as a corrupt one.
//! - A failed save is logged and reported through [`Durability::Unsaved`] on the
//!   returned [`StoreUpdate`]. The in-memory change stands; nothing is retried.
//!
//! ## Concurrency
//!
//! None. The store is single-threaded and the backing file is not locked, so an
//! external edit between load and save is silently overwritten (last writer wins).
//!
//! ## Implementations
//!
//! - [`fs_backend::JsonFileBackend`]: Production backend. Creates the parent directory on
//!   first write and, by default, writes through a temp file plus rename.
//! - [`mem_backend::MemBackend`]: For testing logic without filesystem I/O.
//! - [`memory::InMemoryStore`]: `ReferenceStore<MemBackend>`, plus test fixtures.

use crate::error::CodeRefsError;

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;
pub mod reference_store;

pub use reference_store::ReferenceStore;

/// What happened when the backing document was read.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The document parsed; this many records were loaded.
    Loaded(usize),
    /// No document exists yet.
    Missing,
    /// The document could not be read or parsed and was ignored.
    Discarded(CodeRefsError),
}

impl LoadOutcome {
    pub fn record_count(&self) -> usize {
        match self {
            LoadOutcome::Loaded(count) => *count,
            LoadOutcome::Missing | LoadOutcome::Discarded(_) => 0,
        }
    }
}

/// Whether a mutation reached storage.
#[derive(Debug)]
pub enum Durability {
    Saved,
    Unsaved(CodeRefsError),
}

/// Result of a store mutation: the operation's value plus its durability.
#[derive(Debug)]
pub struct StoreUpdate<T> {
    pub value: T,
    pub durability: Durability,
}

impl<T> StoreUpdate<T> {
    pub fn new(value: T, durability: Durability) -> Self {
        Self { value, durability }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self.durability, Durability::Saved)
    }

    pub fn into_value(self) -> T {
        self.value
    }

    /// The save error, if the mutation was not persisted.
    pub fn save_error(&self) -> Option<&CodeRefsError> {
        match &self.durability {
            Durability::Saved => None,
            Durability::Unsaved(e) => Some(e),
        }
    }
}
