//! # coderefs Architecture
//!
//! coderefs is the **core of a reference side panel** for a code editor. Users bookmark
//! files, code snippets, workspace-unique snippets or free-text notes and later jump back
//! to them. The panel UI, command wiring and URI handling belong to the host editor; this
//! crate is the part that can be tested without one.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Host (editor extension, panel message handler)             │
//! │  - Renders CmdResult messages, opens JumpTargets            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the store and config, supplies the corpus           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Uniqueness gate, jump resolution, user-facing messages   │
//! └─────────────────────────────────────────────────────────────┘
//!                 │                              │
//!                 ▼                              ▼
//! ┌───────────────────────────────┐ ┌───────────────────────────┐
//! │  Storage Layer (store/)       │ │  Snippet Locator          │
//! │  - ordered records, one JSON  │ │  (locator/)               │
//! │    document, degraded loads   │ │  - substring scan, early  │
//! │                               │ │    exit at the match limit│
//! └───────────────────────────────┘ └───────────────────────────┘
//! ```
//!
//! ## Errors vs. Outcomes
//!
//! Storage and scan failures never escape as errors from store or locator operations.
//! They come back as values ([`store::LoadOutcome`], [`store::Durability`],
//! [`locator::LocateReport`]) and are logged with `tracing`. A snippet that is missing or
//! ambiguous is an expected outcome and shows up as a [`commands::CmdMessage`].
//! `Err` is reserved for things like an invalid corpus pattern or an unreadable config.
//!
//! ## Concurrency
//!
//! Single-threaded. Operations run one at a time in response to host events; a scan
//! reads one document at a time and is never cancelled midway.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic per operation
//! - [`store`]: Reference store and storage backends
//! - [`locator`]: Snippet search over a corpus of documents
//! - [`model`]: `ReferenceRecord` and `ReferenceKind`
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod locator;
pub mod model;
pub mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
