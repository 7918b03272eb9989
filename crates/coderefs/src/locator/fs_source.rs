use super::DocumentSource;
use crate::error::{CodeRefsError, Result};
use glob::{MatchOptions, Pattern};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// A document read from disk on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDocument {
    path: PathBuf,
}

impl FileDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DocumentSource for FileDocument {
    fn path(&self) -> &Path {
        &self.path
    }

    fn read_text(&self) -> Result<String> {
        fs::read_to_string(&self.path).map_err(|source| CodeRefsError::Document {
            path: self.path.clone(),
            source,
        })
    }
}

/// Which files under a workspace root make up the corpus.
///
/// Patterns are globs matched against paths relative to `root` (`*` does not cross
/// `/`, `**` does). A file is a candidate when it matches an include pattern and no
/// exclude pattern; an empty include list admits every file. Directories fully
/// covered by an exclude pattern are not walked.
#[derive(Debug, Clone)]
pub struct CorpusScope {
    pub root: PathBuf,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub max_files: usize,
}

const PATTERN_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

impl CorpusScope {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            include: Vec::new(),
            exclude: Vec::new(),
            max_files: usize::MAX,
        }
    }

    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.include.push(pattern.into());
        self
    }

    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude.push(pattern.into());
        self
    }

    pub fn with_max_files(mut self, max_files: usize) -> Self {
        self.max_files = max_files;
        self
    }

    /// Candidate file paths, in file-name-sorted walk order, at most `max_files`.
    pub fn enumerate(&self) -> Result<Vec<PathBuf>> {
        if !self.root.is_dir() {
            return Err(CodeRefsError::Corpus(format!(
                "Corpus root is not a directory: {}",
                self.root.display()
            )));
        }
        let include = compile(&self.include)?;
        let exclude = compile(&self.exclude)?;

        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                if entry.depth() == 0 || !entry.file_type().is_dir() {
                    return true;
                }
                let rel = entry.path().strip_prefix(&self.root).unwrap_or(entry.path());
                !dir_excluded(rel, &exclude)
            });

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!("Skipping unreadable corpus entry: {e}");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = entry.path().strip_prefix(&self.root).unwrap_or(entry.path());
            let included = include.is_empty() || any_match(&include, rel);
            if !included || any_match(&exclude, rel) {
                continue;
            }
            if files.len() >= self.max_files {
                debug!(max = self.max_files, "Corpus file cap reached");
                break;
            }
            files.push(entry.into_path());
        }
        Ok(files)
    }

    /// The enumerated files as readable documents.
    pub fn documents(&self) -> Result<Vec<FileDocument>> {
        Ok(self.enumerate()?.into_iter().map(FileDocument::new).collect())
    }
}

fn compile(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| {
            Pattern::new(p)
                .map_err(|e| CodeRefsError::Corpus(format!("Invalid pattern '{}': {}", p, e)))
        })
        .collect()
}

fn any_match(patterns: &[Pattern], rel: &Path) -> bool {
    patterns
        .iter()
        .any(|p| p.matches_path_with(rel, PATTERN_OPTIONS))
}

// A directory is pruned when an arbitrary child of it would be excluded,
// e.g. `node_modules` under `**/node_modules/**`.
fn dir_excluded(rel_dir: &Path, exclude: &[Pattern]) -> bool {
    any_match(exclude, &rel_dir.join("_"))
}
