//! # Configuration
//!
//! Configuration is managed by [`confique`], which handles layered loading from a TOML
//! file, environment variables and compiled defaults.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `CODEREFS_STORAGE_FILE`, `CODEREFS_MATCH_LIMIT`, etc.
//! 2. **Config file**: a `coderefs.toml` handed to [`CodeRefsConfig::load`].
//! 3. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `storage_file` | `<data dir>/references.json` | Backing JSON document |
//! | `atomic_writes` | `true` | Write to a temp file, then rename over the document |
//! | `pretty_json` | `true` | Indent the persisted document |
//! | `match_limit` | `2` | Matches after which a snippet scan stops |
//! | `include` | `["**/*"]` | Corpus include globs |
//! | `exclude` | `["**/node_modules/**", "**/.git/**"]` | Corpus exclude globs |
//! | `max_corpus_files` | `5000` | Cap on files enumerated for a scan |

use crate::error::Result;
use crate::locator::fs_source::CorpusScope;
use crate::locator::DEFAULT_MATCH_LIMIT;
use crate::store::fs_backend::JsonFileBackend;
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const STORAGE_FILE_NAME: &str = "references.json";

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CodeRefsConfig {
    /// Path of the persisted references document. When absent, the platform data
    /// directory is used.
    #[config(env = "CODEREFS_STORAGE_FILE")]
    pub storage_file: Option<PathBuf>,

    /// Replace the document atomically (temp file + rename) on every save.
    #[config(env = "CODEREFS_ATOMIC_WRITES", default = true)]
    pub atomic_writes: bool,

    #[config(env = "CODEREFS_PRETTY_JSON", default = true)]
    pub pretty_json: bool,

    /// Number of matching documents after which a scan stops. Values below 2 act as 2.
    #[config(env = "CODEREFS_MATCH_LIMIT", default = 2)]
    pub match_limit: usize,

    #[config(default = ["**/*"])]
    pub include: Vec<String>,

    #[config(default = ["**/node_modules/**", "**/.git/**"])]
    pub exclude: Vec<String>,

    #[config(env = "CODEREFS_MAX_CORPUS_FILES", default = 5000)]
    pub max_corpus_files: usize,
}

impl Default for CodeRefsConfig {
    fn default() -> Self {
        Self {
            storage_file: None,
            atomic_writes: true,
            pretty_json: true,
            match_limit: DEFAULT_MATCH_LIMIT,
            include: vec!["**/*".to_string()],
            exclude: vec!["**/node_modules/**".to_string(), "**/.git/**".to_string()],
            max_corpus_files: 5000,
        }
    }
}

impl CodeRefsConfig {
    /// Loads from the environment, then `file` if given, then defaults.
    /// A missing file is not an error.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(file) = file {
            builder = builder.file(file);
        }
        Ok(builder.load()?)
    }

    /// The configured storage file, or `references.json` in the platform data dir.
    /// Falls back to the working directory when no home directory can be found.
    pub fn storage_path(&self) -> PathBuf {
        if let Some(path) = &self.storage_file {
            return path.clone();
        }
        ProjectDirs::from("", "", "coderefs")
            .map(|dirs| dirs.data_dir().join(STORAGE_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(STORAGE_FILE_NAME))
    }

    pub fn file_backend(&self) -> JsonFileBackend {
        JsonFileBackend::new(self.storage_path())
            .with_atomic_writes(self.atomic_writes)
            .with_pretty_json(self.pretty_json)
    }

    /// Corpus scope rooted at `root` with the configured patterns and cap.
    pub fn corpus_scope(&self, root: impl Into<PathBuf>) -> CorpusScope {
        CorpusScope {
            root: root.into(),
            include: self.include.clone(),
            exclude: self.exclude.clone(),
            max_files: self.max_corpus_files,
        }
    }

    pub fn effective_match_limit(&self) -> usize {
        self.match_limit.max(DEFAULT_MATCH_LIMIT)
    }
}
