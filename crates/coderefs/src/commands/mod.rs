//! # Command Layer
//!
//! This module contains the **business logic** that sits between the API facade and the
//! store/locator. Each command lives in its own submodule as plain functions over Rust
//! types.
//!
//! ## Role and Responsibilities
//!
//! - Combine store operations with snippet location (the uniqueness gate, jump
//!   resolution)
//! - Turn expected outcomes (snippet missing, snippet ambiguous, unknown id, unsaved
//!   change) into structured [`CmdMessage`]s rather than errors
//! - Return a [`CmdResult`] carrying affected/listed records and an optional
//!   [`JumpTarget`]
//!
//! ## What Commands Do NOT Do
//!
//! - **Any terminal or UI I/O**: the host renders messages however it likes
//! - **Corpus enumeration**: callers hand in the corpus to scan
//!
//! An `Err` from a command means the command could not run at all. "Snippet not found"
//! is not an error, it is a message with [`MessageLevel::Error`].
//!
//! ## Command Modules
//!
//! - [`create`]: Add file, file-snippet and comment references; gated global snippets
//! - [`list`]: Records in display order
//! - [`rename`]: Retitle a record
//! - [`delete`]: Remove a record
//! - [`reorder`]: Apply a new display order
//! - [`jump`]: Resolve a record to a location to open

use crate::locator::TextRange;
use crate::model::ReferenceRecord;
use crate::store::StoreUpdate;
use serde::Serialize;
use std::path::PathBuf;

pub mod create;
pub mod delete;
pub mod jump;
pub mod list;
pub mod rename;
pub mod reorder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Where the editor should go. `range` is a character range in the file, when known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JumpTarget {
    pub path: PathBuf,
    pub range: Option<TextRange>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_records: Vec<ReferenceRecord>,
    pub listed_records: Vec<ReferenceRecord>,
    pub jump: Option<JumpTarget>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_records(mut self, records: Vec<ReferenceRecord>) -> Self {
        self.listed_records = records;
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|m| m.level == MessageLevel::Error)
    }

    /// Adds a warning when the store could not persist `update`.
    pub(crate) fn note_durability<T>(&mut self, update: &StoreUpdate<T>) {
        if let Some(e) = update.save_error() {
            self.add_message(CmdMessage::warning(format!(
                "Change kept for this session only, saving failed: {}",
                e
            )));
        }
    }
}
