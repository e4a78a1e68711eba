use std::collections::BTreeSet;

use crate::{Ledger, LedgerStore, SqliteStore};

fn test_db() -> SqliteStore {
    SqliteStore::open_in_memory().expect("Failed to create test DB")
}

#[test]
fn test_open_and_migrate() {
    let db = test_db();
    assert!(db.used_numbers("acme").unwrap().is_empty());
    assert!(db.export().unwrap().is_empty());
}

#[test]
fn test_record_ignores_duplicates() {
    let db = test_db();
    db.record("acme", &[10, 9, 8, 7]).unwrap();
    db.record("acme", &[8, 6]).unwrap();
    assert_eq!(
        db.used_numbers("acme").unwrap(),
        BTreeSet::from([6, 7, 8, 9, 10])
    );
}

#[test]
fn test_customers_are_isolated() {
    let db = test_db();
    db.record("acme", &[1]).unwrap();
    db.record("globex", &[2]).unwrap();
    assert_eq!(db.used_numbers("acme").unwrap(), BTreeSet::from([1]));
    assert_eq!(db.used_numbers("globex").unwrap(), BTreeSet::from([2]));
}

#[test]
fn test_import_and_export() {
    let db = test_db();
    let mut ledger = Ledger::new();
    ledger.record("acme", &[100, 99, 98, 97]);
    ledger.record("globex", &[5]);

    assert_eq!(db.import(&ledger).unwrap(), 5);
    // Importing again adds nothing.
    assert_eq!(db.import(&ledger).unwrap(), 0);
    assert_eq!(db.export().unwrap(), ledger);
}

#[test]
fn test_reopen_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.db");
    {
        let db = SqliteStore::open(&path).unwrap();
        db.record("acme", &[42, 41]).unwrap();
    }
    let db = SqliteStore::open(&path).unwrap();
    assert_eq!(db.used_numbers("acme").unwrap(), BTreeSet::from([41, 42]));
}
