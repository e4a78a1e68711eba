use std::collections::BTreeSet;

use super::json_store;
use crate::{JsonFileStore, Ledger, LedgerError, LedgerStore};

#[test]
fn test_absent_file_is_empty() {
    let (_dir, store) = json_store();
    assert!(store.used_numbers("acme").unwrap().is_empty());
    assert!(!store.path().exists());
}

#[test]
fn test_record_then_query() {
    let (_dir, store) = json_store();
    store.record("acme", &[10, 9, 8, 7]).unwrap();
    let used = store.used_numbers("acme").unwrap();
    assert_eq!(used, BTreeSet::from([7, 8, 9, 10]));
    assert!(store.used_numbers("globex").unwrap().is_empty());
}

#[test]
fn test_record_merges_across_calls() {
    let (_dir, store) = json_store();
    store.record("acme", &[10, 9]).unwrap();
    store.record("acme", &[9, 8]).unwrap();
    store.record("globex", &[1]).unwrap();
    assert_eq!(
        store.used_numbers("acme").unwrap(),
        BTreeSet::from([8, 9, 10])
    );
    assert_eq!(store.used_numbers("globex").unwrap(), BTreeSet::from([1]));
}

#[test]
fn test_round_trip_through_file() {
    let (dir, store) = json_store();
    store.record("acme", &[4, 3, 2, 1]).unwrap();
    store.record("globex", &[9_999_999]).unwrap();

    let reopened = JsonFileStore::new(dir.path().join("data_store.json"));
    let mut expected = Ledger::new();
    expected.record("acme", &[1, 2, 3, 4]);
    expected.record("globex", &[9_999_999]);
    assert_eq!(reopened.load().unwrap(), expected);
}

#[test]
fn test_persisted_shape_is_object_of_arrays() {
    let (_dir, store) = json_store();
    store.record("acme", &[100, 99]).unwrap();
    let text = std::fs::read_to_string(store.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value, serde_json::json!({ "acme": [99, 100] }));
}

#[test]
fn test_reads_legacy_document_with_duplicates() {
    let (_dir, store) = json_store();
    std::fs::write(store.path(), r#"{"acme": [100, 99, 99, 98]}"#).unwrap();
    assert_eq!(
        store.used_numbers("acme").unwrap(),
        BTreeSet::from([98, 99, 100])
    );
}

#[test]
fn test_corrupt_file_is_reported() {
    let (_dir, store) = json_store();
    std::fs::write(store.path(), "not json").unwrap();
    assert!(matches!(
        store.used_numbers("acme"),
        Err(LedgerError::StoreCorrupt { .. })
    ));
    assert!(matches!(
        store.record("acme", &[1]),
        Err(LedgerError::StoreCorrupt { .. })
    ));
    // The corrupt document is left untouched.
    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "not json");
}

#[test]
fn test_wrong_shape_is_corrupt() {
    let (_dir, store) = json_store();
    std::fs::write(store.path(), r#"{"acme": {"numbers": [1]}}"#).unwrap();
    assert!(matches!(
        store.used_numbers("acme"),
        Err(LedgerError::StoreCorrupt { .. })
    ));
}

#[test]
fn test_record_creates_parent_directory() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("nested/ledger/data_store.json"));
    store.record("acme", &[5]).unwrap();
    assert!(store.path().exists());
}
