use std::collections::BTreeSet;
use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{Ledger, LedgerError};

use super::LedgerStore;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS issued_numbers (
    customer_id TEXT NOT NULL,
    number INTEGER NOT NULL,
    issued_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    PRIMARY KEY (customer_id, number)
);
"#;

/// Ledger backed by SQLite.
///
/// `record` inserts inside one transaction, so concurrent writers for the
/// same customer are serialized by SQLite instead of overwriting each other.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open or create the ledger database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LedgerError> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.configure()?;
        store.migrate()?;
        Ok(store)
    }

    /// Create an in-memory ledger (for testing).
    pub fn open_in_memory() -> Result<Self, LedgerError> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.configure()?;
        store.migrate()?;
        Ok(store)
    }

    fn with_conn<F, R>(&self, f: F) -> Result<R, LedgerError>
    where
        F: FnOnce(&Connection) -> Result<R, LedgerError>,
    {
        let conn = self.conn.lock().map_err(|_| LedgerError::LockPoisoned)?;
        f(&conn)
    }

    fn with_conn_mut<F, R>(&self, f: F) -> Result<R, LedgerError>
    where
        F: FnOnce(&mut Connection) -> Result<R, LedgerError>,
    {
        let mut conn = self.conn.lock().map_err(|_| LedgerError::LockPoisoned)?;
        f(&mut conn)
    }

    fn configure(&self) -> Result<(), LedgerError> {
        self.with_conn(|conn| {
            conn.execute_batch(
                "PRAGMA journal_mode=WAL;
                 PRAGMA busy_timeout=5000;",
            )?;
            Ok(())
        })
    }

    fn migrate(&self) -> Result<(), LedgerError> {
        self.with_conn(|conn| {
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
    }

    /// Copy every customer's numbers from a JSON ledger. Returns the number
    /// of rows that were not already present.
    pub fn import(&self, ledger: &Ledger) -> Result<usize, LedgerError> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            let mut inserted = 0;
            {
                let mut stmt = tx.prepare(
                    "INSERT OR IGNORE INTO issued_numbers (customer_id, number) VALUES (?1, ?2)",
                )?;
                for (customer_id, numbers) in ledger.customers() {
                    for number in numbers {
                        inserted += stmt.execute(rusqlite::params![customer_id, number])?;
                    }
                }
            }
            tx.commit()?;
            Ok(inserted)
        })
    }

    /// Export the full ledger as a whole-document value.
    pub fn export(&self) -> Result<Ledger, LedgerError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT customer_id, number FROM issued_numbers ORDER BY customer_id, number",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, u32>(1)?))
            })?;
            let mut ledger = Ledger::new();
            for row in rows {
                let (customer_id, number) = row?;
                ledger.record(&customer_id, &[number]);
            }
            Ok(ledger)
        })
    }
}

impl LedgerStore for SqliteStore {
    fn used_numbers(&self, customer_id: &str) -> Result<BTreeSet<u32>, LedgerError> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT number FROM issued_numbers WHERE customer_id = ?1")?;
            let rows = stmt.query_map([customer_id], |row| row.get::<_, u32>(0))?;
            rows.collect::<Result<BTreeSet<_>, _>>().map_err(Into::into)
        })
    }

    fn record(&self, customer_id: &str, numbers: &[u32]) -> Result<(), LedgerError> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            let mut added = 0;
            {
                let mut stmt = tx.prepare(
                    "INSERT OR IGNORE INTO issued_numbers (customer_id, number) VALUES (?1, ?2)",
                )?;
                for number in numbers {
                    added += stmt.execute(rusqlite::params![customer_id, number])?;
                }
            }
            tx.commit()?;
            tracing::debug!(customer_id, added, "Recorded numbers in SQLite ledger");
            Ok(())
        })
    }
}
