use crate::commands::{CmdMessage, CmdResult};
use crate::locator::{self, DocumentSource, LocateResult};
use crate::model::ReferenceKind;
use crate::store::backend::StorageBackend;
use crate::store::ReferenceStore;
use std::path::Path;

/// An ungated reference to add. Global snippets go through [`global_snippet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewReference {
    File { path: String },
    FileSnippet { path: String, snippet: String },
    Comment,
}

pub fn run<B: StorageBackend>(
    store: &mut ReferenceStore<B>,
    title: String,
    target: NewReference,
) -> CmdResult {
    let (kind, file_path, snippet) = match target {
        NewReference::File { path } => (ReferenceKind::File, Some(path), None),
        NewReference::FileSnippet { path, snippet } => {
            (ReferenceKind::FileSnippet, Some(path), Some(snippet))
        }
        NewReference::Comment => (ReferenceKind::Comment, None, None),
    };
    let title = default_title(title, file_path.as_deref(), snippet.as_deref());
    add(store, kind, title, file_path, snippet)
}

/// Adds a global snippet only if exactly one corpus document contains it.
///
/// A missing or ambiguous snippet is reported as an error message and nothing is
/// stored.
pub fn global_snippet<B, I>(
    store: &mut ReferenceStore<B>,
    title: String,
    snippet: String,
    corpus: I,
    match_limit: usize,
) -> CmdResult
where
    B: StorageBackend,
    I: IntoIterator,
    I::Item: DocumentSource,
{
    let mut result = CmdResult::default();
    match locator::locate(&snippet, corpus, match_limit) {
        LocateResult::UniqueMatch(_) => {
            let title = default_title(title, None, Some(snippet.as_str()));
            return add(store, ReferenceKind::GlobalSnippet, title, None, Some(snippet));
        }
        LocateResult::NoMatch => {
            result.add_message(CmdMessage::error(
                "Snippet not found in the workspace, reference not added",
            ));
        }
        LocateResult::AmbiguousMatch { .. } => {
            result.add_message(CmdMessage::error(
                "Snippet occurs in more than one file, a global snippet must be unique",
            ));
        }
    }
    result
}

fn add<B: StorageBackend>(
    store: &mut ReferenceStore<B>,
    kind: ReferenceKind,
    title: String,
    file_path: Option<String>,
    snippet: Option<String>,
) -> CmdResult {
    let update = store.add(kind, title, file_path, snippet);
    let mut result = CmdResult::default();
    result.note_durability(&update);
    let record = update.into_value();
    result.add_message(CmdMessage::success(format!(
        "Reference added: {}",
        record.title
    )));
    result.affected_records.push(record);
    result
}

/// Blank titles fall back to the file name, then the snippet's first line.
fn default_title(title: String, file_path: Option<&str>, snippet: Option<&str>) -> String {
    if !title.trim().is_empty() {
        return title;
    }
    let from_snippet = snippet
        .and_then(|s| s.lines().map(str::trim).find(|l| !l.is_empty()))
        .map(str::to_string);
    let from_path = file_path
        .and_then(|p| Path::new(p).file_name())
        .map(|n| n.to_string_lossy().into_owned());

    match (from_snippet, from_path) {
        (Some(line), _) => line,
        (None, Some(name)) => name,
        (None, None) => title,
    }
}
