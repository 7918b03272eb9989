//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single entry point
//! for a host (an editor panel, a command palette handler, a test).
//!
//! ## Role and Responsibilities
//!
//! - **Owns** the session's [`ReferenceStore`] and [`CodeRefsConfig`]
//! - **Dispatches** to the appropriate command function
//! - **Provides the corpus**: global-snippet operations enumerate the workspace through
//!   the configured [`CorpusScope`](crate::locator::fs_source::CorpusScope), or scan a
//!   caller-supplied corpus via the `*_in` variants (e.g. the open editor buffers)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **Rendering**: Returns [`CmdResult`], not strings
//!
//! ## Generic Over StorageBackend
//!
//! `CodeRefsApi<B: StorageBackend>` works with any backend:
//! - Production: `CodeRefsApi<JsonFileBackend>` via [`CodeRefsApi::open`]
//! - Testing: `CodeRefsApi<MemBackend>`

use crate::commands::{self, CmdResult};
use crate::config::CodeRefsConfig;
use crate::error::{CodeRefsError, Result};
use crate::locator::fs_source::FileDocument;
use crate::locator::DocumentSource;
use crate::model::ReferenceKind;
use crate::store::backend::StorageBackend;
use crate::store::fs_backend::{self, JsonFileBackend};
use crate::store::{LoadOutcome, ReferenceStore};
use std::path::PathBuf;

pub use commands::create::NewReference;

/// The main API facade for reference operations.
pub struct CodeRefsApi<B: StorageBackend> {
    store: ReferenceStore<B>,
    config: CodeRefsConfig,
    workspace_root: Option<PathBuf>,
}

impl CodeRefsApi<JsonFileBackend> {
    /// Opens the file-backed store described by `config`.
    pub fn open(config: CodeRefsConfig) -> (Self, LoadOutcome) {
        let backend = config.file_backend();
        Self::with_backend(backend, config)
    }
}

impl<B: StorageBackend> CodeRefsApi<B> {
    pub fn with_backend(backend: B, config: CodeRefsConfig) -> (Self, LoadOutcome) {
        let (store, outcome) = ReferenceStore::open(backend);
        let api = Self {
            store,
            config,
            workspace_root: None,
        };
        (api, outcome)
    }

    /// Root directory scanned for global snippets.
    pub fn with_workspace_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.workspace_root = Some(root.into());
        self
    }

    pub fn store(&self) -> &ReferenceStore<B> {
        &self.store
    }

    pub fn config(&self) -> &CodeRefsConfig {
        &self.config
    }

    pub fn storage_location(&self) -> PathBuf {
        self.store.storage_location()
    }

    pub fn add_file(&mut self, title: String, path: String) -> CmdResult {
        commands::create::run(&mut self.store, title, NewReference::File { path })
    }

    pub fn add_file_snippet(&mut self, title: String, path: String, snippet: String) -> CmdResult {
        commands::create::run(
            &mut self.store,
            title,
            NewReference::FileSnippet { path, snippet },
        )
    }

    pub fn add_comment(&mut self, text: String) -> CmdResult {
        commands::create::run(&mut self.store, text, NewReference::Comment)
    }

    /// Adds a global snippet if it occurs in exactly one workspace file.
    pub fn add_global_snippet(&mut self, title: String, snippet: String) -> Result<CmdResult> {
        let corpus = self.workspace_documents()?;
        Ok(self.add_global_snippet_in(title, snippet, &corpus))
    }

    pub fn add_global_snippet_in<I>(&mut self, title: String, snippet: String, corpus: I) -> CmdResult
    where
        I: IntoIterator,
        I::Item: DocumentSource,
    {
        let limit = self.config.effective_match_limit();
        commands::create::global_snippet(&mut self.store, title, snippet, corpus, limit)
    }

    pub fn list(&self) -> CmdResult {
        commands::list::run(&self.store)
    }

    pub fn rename(&mut self, id: &str, title: String) -> CmdResult {
        commands::rename::run(&mut self.store, id, title)
    }

    pub fn delete(&mut self, id: &str) -> CmdResult {
        commands::delete::run(&mut self.store, id)
    }

    pub fn reorder<I: AsRef<str>>(&mut self, ids: &[I]) -> CmdResult {
        commands::reorder::run(&mut self.store, ids)
    }

    /// Resolves a reference to a location, scanning the workspace only when the
    /// reference is a global snippet.
    pub fn jump(&self, id: &str) -> Result<CmdResult> {
        let needs_corpus = self
            .store
            .get(id)
            .is_some_and(|r| r.kind == ReferenceKind::GlobalSnippet);
        let corpus = if needs_corpus {
            self.workspace_documents()?
        } else {
            Vec::new()
        };
        Ok(self.jump_in(id, &corpus))
    }

    pub fn jump_in<I>(&self, id: &str, corpus: I) -> CmdResult
    where
        I: IntoIterator,
        I::Item: DocumentSource,
    {
        let limit = self.config.effective_match_limit();
        commands::jump::run(&self.store, id, corpus, limit)
    }

    // The references document may live inside the workspace; it holds every stored
    // snippet verbatim and must never count as a match.
    fn workspace_documents(&self) -> Result<Vec<FileDocument>> {
        let root = self.workspace_root.as_deref().ok_or_else(|| {
            CodeRefsError::Corpus("No workspace folder is open".to_string())
        })?;
        let location = self.store.storage_location();
        let documents = self.config.corpus_scope(root).documents()?;
        Ok(documents
            .into_iter()
            .filter(|doc| !fs_backend::is_storage_artifact(&location, doc.path()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::TextDocument;
    use crate::store::mem_backend::MemBackend;

    fn make_api() -> CodeRefsApi<MemBackend> {
        CodeRefsApi::with_backend(MemBackend::new(), CodeRefsConfig::default()).0
    }

    #[test]
    fn add_and_list_dispatch() {
        let mut api = make_api();
        api.add_file("b".into(), "/a/b.ts".into());
        api.add_comment("todo".into());

        let listed = api.list().listed_records;
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].kind, ReferenceKind::File);
        assert_eq!(listed[1].kind, ReferenceKind::Comment);
    }

    #[test]
    fn global_snippet_without_workspace_is_an_error() {
        let mut api = make_api();
        let result = api.add_global_snippet("t".into(), "foo()".into());
        assert!(matches!(result, Err(CodeRefsError::Corpus(_))));
        assert!(api.store().is_empty());
    }

    #[test]
    fn global_snippet_in_supplied_corpus() {
        let mut api = make_api();
        let corpus = vec![TextDocument::new("/open/a.ts", "foo()")];
        let result = api.add_global_snippet_in("t".into(), "foo()".into(), &corpus);
        assert_eq!(result.affected_records.len(), 1);

        let id = result.affected_records[0].id.clone();
        let jump = api.jump_in(&id, &corpus).jump.unwrap();
        assert_eq!(jump.path, PathBuf::from("/open/a.ts"));
    }

    #[test]
    fn jump_to_file_does_not_need_workspace() {
        let mut api = make_api();
        let id = api.add_file("b".into(), "/a/b.ts".into()).affected_records[0]
            .id
            .clone();
        let result = api.jump(&id).unwrap();
        assert_eq!(result.jump.unwrap().path, PathBuf::from("/a/b.ts"));
    }

    #[test]
    fn rename_delete_reorder_dispatch() {
        let mut api = make_api();
        let a = api.add_comment("A".into()).affected_records[0].id.clone();
        let b = api.add_comment("B".into()).affected_records[0].id.clone();

        api.reorder(&[&b]);
        api.rename(&a, "A2".into());
        api.delete(&b);

        let listed = api.list().listed_records;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "A2");
    }

    #[test]
    fn storage_location_comes_from_backend() {
        let api = make_api();
        assert_eq!(
            api.storage_location(),
            PathBuf::from("memory://references.json")
        );
    }
}
