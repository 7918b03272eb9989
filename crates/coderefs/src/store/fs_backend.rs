use super::backend::StorageBackend;
use crate::error::{CodeRefsError, Result};
use crate::model::ReferenceRecord;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Stores the whole record sequence as one JSON array in a single file.
pub struct JsonFileBackend {
    path: PathBuf,
    atomic_writes: bool,
    pretty: bool,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            atomic_writes: true,
            pretty: true,
        }
    }

    /// When disabled the file is overwritten in place, so a crash mid-write can
    /// leave a truncated document behind (which the next load discards).
    pub fn with_atomic_writes(mut self, atomic: bool) -> Self {
        self.atomic_writes = atomic;
        self
    }

    pub fn with_pretty_json(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(CodeRefsError::Io)?;
            }
        }
        Ok(())
    }

    fn serialize(&self, records: &[ReferenceRecord]) -> Result<String> {
        let content = if self.pretty {
            serde_json::to_string_pretty(records)
        } else {
            serde_json::to_string(records)
        };
        content.map_err(CodeRefsError::Serialization)
    }
}

impl StorageBackend for JsonFileBackend {
    fn load_records(&self) -> Result<Option<Vec<ReferenceRecord>>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path).map_err(CodeRefsError::Io)?;
        let records: Vec<ReferenceRecord> =
            serde_json::from_str(&content).map_err(CodeRefsError::Serialization)?;
        Ok(Some(records))
    }

    fn save_records(&self, records: &[ReferenceRecord]) -> Result<()> {
        self.ensure_parent_dir()?;
        let content = self.serialize(records)?;

        if !self.atomic_writes {
            fs::write(&self.path, content).map_err(CodeRefsError::Io)?;
            return Ok(());
        }

        let tmp_path = self.path.with_file_name(format!(
            "{}{}.tmp",
            temp_prefix(&self.path),
            Uuid::new_v4()
        ));
        fs::write(&tmp_path, content).map_err(CodeRefsError::Io)?;
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(CodeRefsError::Io(e));
        }
        Ok(())
    }

    fn location(&self) -> PathBuf {
        absolute(&self.path)
    }
}

/// True for the document at `location` itself and for the temp files an atomic
/// save leaves next to it.
pub fn is_storage_artifact(location: &Path, candidate: &Path) -> bool {
    let location = absolute(location);
    let candidate = absolute(candidate);
    if candidate == location {
        return true;
    }
    if candidate.parent() != location.parent() {
        return false;
    }
    let prefix = temp_prefix(&location);
    candidate
        .file_name()
        .and_then(|s| s.to_str())
        .is_some_and(|name| name.starts_with(&prefix) && name.ends_with(".tmp"))
}

fn temp_prefix(path: &Path) -> String {
    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("references.json");
    format!(".{}-", file_name)
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
