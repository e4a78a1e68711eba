use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::{Ledger, LedgerError};

use super::LedgerStore;

/// Ledger kept as a single JSON document on disk.
///
/// Every call loads the whole document; `record` writes it back. Two
/// processes recording for the same customer at once can lose one side's
/// numbers. Use [`super::SqliteStore`] when that matters.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full ledger document.
    pub fn load(&self) -> Result<Ledger, LedgerError> {
        Ledger::load(&self.path)
    }
}

impl LedgerStore for JsonFileStore {
    fn used_numbers(&self, customer_id: &str) -> Result<BTreeSet<u32>, LedgerError> {
        Ok(self.load()?.used_numbers(customer_id))
    }

    fn record(&self, customer_id: &str, numbers: &[u32]) -> Result<(), LedgerError> {
        let mut ledger = self.load()?;
        let added = ledger.record(customer_id, numbers);
        ledger.save(&self.path)?;
        tracing::debug!(
            path = %self.path.display(),
            customer_id,
            added,
            "Recorded numbers in JSON ledger"
        );
        Ok(())
    }
}
