//! # Snippet Locator
//!
//! Answers one question: in how many documents of a corpus does a text fragment occur?
//!
//! The answer is classified rather than counted:
//!
//! - [`LocateResult::NoMatch`]: no document contains the fragment.
//! - [`LocateResult::UniqueMatch`]: exactly one does; the match carries the document
//!   path and the character range of the **first** occurrence in it.
//! - [`LocateResult::AmbiguousMatch`]: at least two do. The scan stops as soon as the
//!   match limit is reached, so the number of matches reported is a lower bound,
//!   never a total.
//!
//! Callers use the classification both to gate adding a global snippet (it must be
//! unique) and to re-resolve a stored snippet at jump time.
//!
//! ## Scan Rules
//!
//! - Documents are visited in the order the corpus yields them, one at a time, and each
//!   document's text is read exactly once.
//! - A document that cannot be read counts as "no match": it is logged, recorded as
//!   skipped and the scan moves on.
//! - Matching is exact and case-sensitive. Line endings, encoding and whitespace are
//!   not normalized.
//! - Offsets count Unicode scalar values (`char`s), not bytes. `end` is exclusive.
//!
//! ## Document Sources
//!
//! Anything implementing [`DocumentSource`] can be scanned: [`TextDocument`] wraps text
//! already in memory (an open editor buffer), [`fs_source::FileDocument`] reads from
//! disk, and [`fs_source::CorpusScope`] enumerates files under a workspace root.

use crate::error::{CodeRefsError, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub mod fs_source;

/// Default early-exit limit. Two matches are enough to tell unique from ambiguous.
pub const DEFAULT_MATCH_LIMIT: usize = 2;

/// A corpus member that can produce its full text.
pub trait DocumentSource {
    /// Identity of the document, reported back in matches.
    fn path(&self) -> &Path;

    /// Full text of the document. May fail (missing, unreadable, not UTF-8).
    fn read_text(&self) -> Result<String>;
}

impl<T: DocumentSource + ?Sized> DocumentSource for &T {
    fn path(&self) -> &Path {
        (**self).path()
    }

    fn read_text(&self) -> Result<String> {
        (**self).read_text()
    }
}

/// A document whose text is already in memory.
#[derive(Debug, Clone)]
pub struct TextDocument {
    pub path: PathBuf,
    pub text: String,
}

impl TextDocument {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }
}

impl DocumentSource for TextDocument {
    fn path(&self) -> &Path {
        &self.path
    }

    fn read_text(&self) -> Result<String> {
        Ok(self.text.clone())
    }
}

/// Character range `[start, end)` within a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnippetMatch {
    pub path: PathBuf,
    pub range: TextRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocateResult {
    NoMatch,
    UniqueMatch(SnippetMatch),
    /// Two or more documents matched. `matches` holds the ones found before the scan
    /// stopped; it is not a complete list.
    AmbiguousMatch { matches: Vec<SnippetMatch> },
}

impl LocateResult {
    pub fn is_unique(&self) -> bool {
        matches!(self, LocateResult::UniqueMatch(_))
    }

    pub fn unique_match(&self) -> Option<&SnippetMatch> {
        match self {
            LocateResult::UniqueMatch(m) => Some(m),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct SkippedDocument {
    pub path: PathBuf,
    pub error: CodeRefsError,
}

/// A [`LocateResult`] plus bookkeeping about the scan that produced it.
#[derive(Debug)]
pub struct LocateReport {
    pub result: LocateResult,
    /// Documents whose text was read (or attempted) before the scan ended.
    pub scanned: usize,
    pub skipped: Vec<SkippedDocument>,
}

/// Classifies how many corpus documents contain `fragment`.
///
/// `match_limit` below [`DEFAULT_MATCH_LIMIT`] is raised to it; a limit of one could
/// not tell a unique match from an ambiguous one.
pub fn locate<I>(fragment: &str, corpus: I, match_limit: usize) -> LocateResult
where
    I: IntoIterator,
    I::Item: DocumentSource,
{
    locate_with_report(fragment, corpus, match_limit).result
}

/// Like [`locate`], but also reports how far the scan got and what it skipped.
pub fn locate_with_report<I>(fragment: &str, corpus: I, match_limit: usize) -> LocateReport
where
    I: IntoIterator,
    I::Item: DocumentSource,
{
    let limit = match_limit.max(DEFAULT_MATCH_LIMIT);
    let mut matches = Vec::new();
    let mut skipped = Vec::new();
    let mut scanned = 0;

    if fragment.is_empty() {
        debug!("Empty fragment, nothing to locate");
        return LocateReport {
            result: LocateResult::NoMatch,
            scanned,
            skipped,
        };
    }

    for doc in corpus {
        scanned += 1;
        let text = match doc.read_text() {
            Ok(text) => text,
            Err(error) => {
                if is_not_text(&error) {
                    debug!("Skipping non-text {}", doc.path().display());
                } else {
                    warn!("Skipping {}: {error}", doc.path().display());
                }
                skipped.push(SkippedDocument {
                    path: doc.path().to_path_buf(),
                    error,
                });
                continue;
            }
        };

        if let Some(range) = find_first(&text, fragment) {
            matches.push(SnippetMatch {
                path: doc.path().to_path_buf(),
                range,
            });
            if matches.len() >= limit {
                debug!(limit, scanned, "Match limit reached, stopping scan");
                break;
            }
        }
    }

    let result = match matches.len() {
        0 => LocateResult::NoMatch,
        1 => LocateResult::UniqueMatch(matches.remove(0)),
        _ => LocateResult::AmbiguousMatch { matches },
    };
    LocateReport {
        result,
        scanned,
        skipped,
    }
}

/// Character range of the first occurrence of `fragment` in `text`.
pub fn find_first(text: &str, fragment: &str) -> Option<TextRange> {
    let byte_start = text.find(fragment)?;
    let start = text[..byte_start].chars().count();
    Some(TextRange {
        start,
        end: start + fragment.chars().count(),
    })
}

// Binary and non-UTF-8 files are routine in a workspace walk.
fn is_not_text(error: &CodeRefsError) -> bool {
    matches!(
        error,
        CodeRefsError::Document { source, .. } if source.kind() == std::io::ErrorKind::InvalidData
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Counts reads and can be told to fail.
    struct CountingDocument {
        path: PathBuf,
        text: Option<String>,
        reads: Cell<usize>,
    }

    impl CountingDocument {
        fn ok(path: &str, text: &str) -> Self {
            Self {
                path: PathBuf::from(path),
                text: Some(text.to_string()),
                reads: Cell::new(0),
            }
        }

        fn failing(path: &str) -> Self {
            Self {
                path: PathBuf::from(path),
                text: None,
                reads: Cell::new(0),
            }
        }
    }

    impl DocumentSource for CountingDocument {
        fn path(&self) -> &Path {
            &self.path
        }

        fn read_text(&self) -> Result<String> {
            self.reads.set(self.reads.get() + 1);
            self.text
                .clone()
                .ok_or_else(|| CodeRefsError::Store("unreadable".to_string()))
        }
    }

    #[test]
    fn test_empty_corpus_is_no_match() {
        let corpus: Vec<TextDocument> = Vec::new();
        assert_eq!(locate("foo()", corpus, 2), LocateResult::NoMatch);
    }

    #[test]
    fn test_single_occurrence_is_unique_with_offsets() {
        let corpus = vec![
            TextDocument::new("/a.ts", "nothing here"),
            TextDocument::new("/b.ts", "let x = foo();"),
        ];
        let result = locate("foo()", &corpus, 2);
        assert_eq!(
            result,
            LocateResult::UniqueMatch(SnippetMatch {
                path: PathBuf::from("/b.ts"),
                range: TextRange { start: 8, end: 13 },
            })
        );
    }

    #[test]
    fn test_only_first_occurrence_in_a_document_is_reported() {
        let corpus = vec![TextDocument::new("/a.ts", "foo() foo() foo()")];
        let m = locate("foo()", &corpus, 2);
        assert_eq!(m.unique_match().unwrap().range, TextRange { start: 0, end: 5 });
    }

    #[test]
    fn test_two_documents_are_ambiguous_and_stop_early() {
        let corpus = vec![
            CountingDocument::ok("/a", "foo()"),
            CountingDocument::ok("/b", "x foo()"),
            CountingDocument::ok("/c", "foo()"),
        ];
        let report = locate_with_report("foo()", &corpus, 2);
        match &report.result {
            LocateResult::AmbiguousMatch { matches } => assert_eq!(matches.len(), 2),
            other => panic!("expected ambiguous, got {:?}", other),
        }
        assert_eq!(report.scanned, 2);
        assert_eq!(corpus[2].reads.get(), 0);
    }

    #[test]
    fn test_each_document_read_once() {
        let corpus = vec![CountingDocument::ok("/a", "abc"), CountingDocument::ok("/b", "def")];
        locate("zzz", &corpus, 2);
        assert!(corpus.iter().all(|d| d.reads.get() == 1));
    }

    #[test]
    fn test_failing_document_is_skipped() {
        let corpus = vec![
            CountingDocument::failing("/broken"),
            CountingDocument::ok("/good", "call foo() here"),
        ];
        let report = locate_with_report("foo()", &corpus, 2);
        assert!(report.result.is_unique());
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].path, PathBuf::from("/broken"));
        assert_eq!(report.scanned, 2);
    }

    #[test]
    fn test_higher_limit_collects_more_matches() {
        let corpus = vec![
            TextDocument::new("/a", "x"),
            TextDocument::new("/b", "x"),
            TextDocument::new("/c", "x"),
        ];
        match locate("x", &corpus, 10) {
            LocateResult::AmbiguousMatch { matches } => assert_eq!(matches.len(), 3),
            other => panic!("expected ambiguous, got {:?}", other),
        }
    }

    #[test]
    fn test_limit_below_two_is_raised() {
        let corpus = vec![TextDocument::new("/a", "x"), TextDocument::new("/b", "x")];
        assert!(matches!(
            locate("x", &corpus, 1),
            LocateResult::AmbiguousMatch { .. }
        ));
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let corpus = vec![TextDocument::new("/a", "FOO()")];
        assert_eq!(locate("foo()", &corpus, 2), LocateResult::NoMatch);
    }

    #[test]
    fn test_no_line_ending_normalization() {
        let corpus = vec![TextDocument::new("/a", "a\r\nb")];
        assert_eq!(locate("a\nb", &corpus, 2), LocateResult::NoMatch);
        assert!(locate("a\r\nb", &corpus, 2).is_unique());
    }

    #[test]
    fn test_empty_fragment_matches_nothing() {
        let corpus = vec![CountingDocument::ok("/a", "anything")];
        let report = locate_with_report("", &corpus, 2);
        assert_eq!(report.result, LocateResult::NoMatch);
        assert_eq!(corpus[0].reads.get(), 0);
    }

    #[test]
    fn test_offsets_count_chars_not_bytes() {
        let range = find_first("héllo wörld", "wörld").unwrap();
        assert_eq!(range, TextRange { start: 6, end: 11 });
    }

    #[test]
    fn test_binary_file_is_skipped_as_non_text() {
        use crate::locator::fs_source::FileDocument;
        use tempfile::TempDir;

        let dir = TempDir::new().unwrap();
        let binary = dir.path().join("logo.png");
        std::fs::write(&binary, [0x89, 0x50, 0xff, 0xfe, 0x00]).unwrap();
        let missing = FileDocument::new(dir.path().join("gone.rs"));

        let report = locate_with_report("foo", [FileDocument::new(&binary), missing], 2);
        assert_eq!(report.result, LocateResult::NoMatch);
        assert_eq!(report.skipped.len(), 2);
        assert!(is_not_text(&report.skipped[0].error));
        assert!(!is_not_text(&report.skipped[1].error));
    }
}
