use crate::store::fs_backend::JsonFileBackend;
use crate::store::ReferenceStore;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    // We keep _temp_dir to ensure the directory is not dropped until the test is done
    pub _temp_dir: TempDir,
    pub root: PathBuf,
    pub storage_file: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        let storage_file = root.join("state").join("references.json");
        Self {
            _temp_dir: temp_dir,
            root,
            storage_file,
        }
    }

    /// Opens a store on this environment's storage file. Call again to simulate a
    /// new session.
    pub fn open_store(&self) -> ReferenceStore<JsonFileBackend> {
        ReferenceStore::open(JsonFileBackend::new(&self.storage_file)).0
    }

    /// Writes a workspace file under `root/workspace` and returns its path.
    pub fn write_workspace_file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.workspace().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create workspace dir");
        }
        std::fs::write(&path, content).expect("failed to write workspace file");
        path
    }

    pub fn workspace(&self) -> PathBuf {
        self.root.join("workspace")
    }
}
