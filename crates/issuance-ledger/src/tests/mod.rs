use tempfile::TempDir;

use crate::JsonFileStore;

fn json_store() -> (TempDir, JsonFileStore) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = JsonFileStore::new(dir.path().join("data_store.json"));
    (dir, store)
}

mod json;
mod sqlite;
