use coderefs::model::{ReferenceKind, ReferenceRecord};
use coderefs::store::backend::StorageBackend;
use coderefs::store::fs_backend::JsonFileBackend;
use coderefs::store::{LoadOutcome, ReferenceStore};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn setup() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("nested").join("refs").join("references.json");
    (dir, file)
}

fn sample() -> Vec<ReferenceRecord> {
    vec![
        ReferenceRecord::new(ReferenceKind::File, "b".into(), Some("/a/b.ts".into()), None),
        ReferenceRecord::new(
            ReferenceKind::GlobalSnippet,
            "foo".into(),
            None,
            Some("foo()".into()),
        ),
    ]
}

#[test]
fn test_fs_backend_missing_file_loads_none() {
    let (_dir, file) = setup();
    let backend = JsonFileBackend::new(&file);
    assert!(backend.load_records().unwrap().is_none());
}

#[test]
fn test_fs_backend_creates_parent_dir_on_save() {
    let (_dir, file) = setup();
    let backend = JsonFileBackend::new(&file);
    let records = sample();
    backend.save_records(&records).unwrap();
    assert!(file.exists());

    let loaded = backend.load_records().unwrap().unwrap();
    assert_eq!(loaded, records);
    assert_eq!(loaded[0].kind, ReferenceKind::File);
    assert_eq!(loaded[1].snippet.as_deref(), Some("foo()"));
}

#[test]
fn test_fs_backend_document_shape() {
    let (_dir, file) = setup();
    let backend = JsonFileBackend::new(&file);
    let records = sample();
    backend.save_records(&records).unwrap();

    let raw = fs::read_to_string(&file).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let array = json.as_array().unwrap();
    assert_eq!(array.len(), 2);
    assert_eq!(array[0]["id"], records[0].id.as_str());
    assert_eq!(array[0]["type"], "file");
    assert_eq!(array[0]["filePath"], "/a/b.ts");
    assert!(array[0].get("snippet").is_none());
    assert_eq!(array[1]["type"], "global-snippet");
    assert!(array[1]["createdAt"].as_str().unwrap().contains('T'));
}

#[test]
fn test_fs_backend_atomic_write_artifacts() {
    let (_dir, file) = setup();
    let backend = JsonFileBackend::new(&file);
    backend.save_records(&sample()).unwrap();
    backend.save_records(&sample()).unwrap();

    // Verify NO .tmp files are left behind
    for entry in fs::read_dir(file.parent().unwrap()).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap().to_string();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }
}

#[test]
fn test_fs_backend_direct_write_and_compact_json() {
    let (_dir, file) = setup();
    let backend = JsonFileBackend::new(&file)
        .with_atomic_writes(false)
        .with_pretty_json(false);
    backend.save_records(&sample()).unwrap();

    let raw = fs::read_to_string(&file).unwrap();
    assert!(!raw.contains('\n'));
    assert_eq!(backend.load_records().unwrap().unwrap().len(), 2);
}

#[test]
fn test_fs_backend_corrupt_file_is_an_error() {
    let (_dir, file) = setup();
    fs::create_dir_all(file.parent().unwrap()).unwrap();
    fs::write(&file, "[{\"id\": 1").unwrap();
    let backend = JsonFileBackend::new(&file);
    assert!(backend.load_records().is_err());
}

#[test]
fn test_store_discards_corrupt_file_then_overwrites_it() {
    let (_dir, file) = setup();
    fs::create_dir_all(file.parent().unwrap()).unwrap();
    fs::write(&file, "not json at all").unwrap();

    let (mut store, outcome) = ReferenceStore::open(JsonFileBackend::new(&file));
    assert!(matches!(outcome, LoadOutcome::Discarded(_)));
    assert!(store.is_empty());
    assert_eq!(fs::read_to_string(&file).unwrap(), "not json at all");

    store.add(ReferenceKind::Comment, "note".into(), None, None);
    let (reopened, outcome) = ReferenceStore::open(JsonFileBackend::new(&file));
    assert!(matches!(outcome, LoadOutcome::Loaded(1)));
    assert_eq!(reopened.list()[0].title, "note");
}

#[test]
fn test_store_save_failure_is_reported_not_raised() {
    let dir = TempDir::new().unwrap();
    // A directory where the file should be makes every write fail
    let file = dir.path().join("references.json");
    fs::create_dir_all(&file).unwrap();

    let (mut store, _) = ReferenceStore::open(JsonFileBackend::new(&file).with_atomic_writes(false));
    let update = store.add(ReferenceKind::Comment, "volatile".into(), None, None);
    assert!(!update.is_saved());
    assert!(update.save_error().is_some());
    assert_eq!(store.len(), 1);
}

#[test]
fn test_storage_location_is_absolute() {
    let (_dir, file) = setup();
    let store = ReferenceStore::open(JsonFileBackend::new(&file)).0;
    assert_eq!(store.storage_location(), file);
    assert!(store.storage_location().is_absolute());
    assert!(!file.exists());
}
