//! Resolve a stored reference to a place to open.
//!
//! Snippets are re-located every time because the file may have changed since the
//! reference was made: the snippet can have moved, disappeared or been duplicated.

use crate::commands::{CmdMessage, CmdResult, JumpTarget};
use crate::locator::fs_source::FileDocument;
use crate::locator::{self, DocumentSource, LocateResult};
use crate::model::{ReferenceKind, ReferenceRecord};
use crate::store::backend::StorageBackend;
use crate::store::ReferenceStore;
use std::path::PathBuf;

/// `corpus` is only scanned for global snippets.
pub fn run<B, I>(store: &ReferenceStore<B>, id: &str, corpus: I, match_limit: usize) -> CmdResult
where
    B: StorageBackend,
    I: IntoIterator,
    I::Item: DocumentSource,
{
    let mut result = CmdResult::default();
    let Some(record) = store.get(id) else {
        result.add_message(CmdMessage::error(format!("No reference with id {}", id)));
        return result;
    };

    match record.kind {
        ReferenceKind::File => match &record.file_path {
            Some(path) => {
                result.jump = Some(JumpTarget {
                    path: PathBuf::from(path),
                    range: None,
                });
            }
            None => missing_field(&mut result, record, "file path"),
        },
        ReferenceKind::FileSnippet => match (&record.file_path, &record.snippet) {
            (Some(path), Some(snippet)) => {
                file_snippet(&mut result, path, snippet, match_limit);
            }
            _ => missing_field(&mut result, record, "file path or snippet"),
        },
        ReferenceKind::GlobalSnippet => match &record.snippet {
            Some(snippet) => global_snippet(&mut result, snippet, corpus, match_limit),
            None => missing_field(&mut result, record, "snippet"),
        },
        ReferenceKind::Comment => {
            result.add_message(CmdMessage::info(format!(
                "Comment references have no location: {}",
                record.title
            )));
        }
    }
    result.affected_records.push(record.clone());
    result
}

// The file is opened even when the snippet is gone; the warning says why there is no
// selection.
fn file_snippet(result: &mut CmdResult, path: &str, snippet: &str, match_limit: usize) {
    let doc = FileDocument::new(path);
    let range = match locator::locate(snippet, [&doc], match_limit) {
        LocateResult::UniqueMatch(m) => Some(m.range),
        _ => {
            result.add_message(CmdMessage::warning(format!(
                "Snippet no longer found in {}",
                path
            )));
            None
        }
    };
    result.jump = Some(JumpTarget {
        path: PathBuf::from(path),
        range,
    });
}

fn global_snippet<I>(result: &mut CmdResult, snippet: &str, corpus: I, match_limit: usize)
where
    I: IntoIterator,
    I::Item: DocumentSource,
{
    match locator::locate(snippet, corpus, match_limit) {
        LocateResult::UniqueMatch(m) => {
            result.jump = Some(JumpTarget {
                path: m.path,
                range: Some(m.range),
            });
        }
        LocateResult::NoMatch => {
            result.add_message(CmdMessage::error("Snippet not found in the workspace"));
        }
        LocateResult::AmbiguousMatch { .. } => {
            result.add_message(CmdMessage::warning(
                "Snippet now occurs in more than one file",
            ));
        }
    }
}

fn missing_field(result: &mut CmdResult, record: &ReferenceRecord, field: &str) {
    result.add_message(CmdMessage::error(format!(
        "Reference '{}' has no {}",
        record.title, field
    )));
}
