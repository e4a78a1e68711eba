//! Per-customer issuance ledger and barcode number allocation.
//!
//! The ledger remembers which numbers each customer has been issued. The
//! allocator picks the next starting number on top of it, and batch
//! expansion turns that number into the run of numbers one issuance consumes.

pub mod allocator;
pub mod batch;
pub mod ledger;
pub mod store;

use std::path::PathBuf;

// Re-exports for convenience
pub use allocator::{AllocationError, Allocator, next_candidate, validate_number};
pub use batch::{BatchItem, IssuedBatch, SUFFIX_PATTERN, expand};
pub use ledger::Ledger;
pub use store::{JsonFileStore, LedgerStore, MemoryStore, SqliteStore};

/// Default location of the JSON ledger document.
pub const DEFAULT_LEDGER_PATH: &str = "data_store.json";

/// Ledger storage error type.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Ledger store {} is corrupt: {source}", .path.display())]
    StoreCorrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to serialize ledger: {0}")]
    Serialize(serde_json::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Ledger lock poisoned")]
    LockPoisoned,
}

#[cfg(test)]
mod tests;
