use std::collections::BTreeSet;
use std::sync::Mutex;

use crate::{Ledger, LedgerError};

use super::LedgerStore;

/// In-process ledger, used as a fake in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    ledger: Mutex<Ledger>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ledger(ledger: Ledger) -> Self {
        Self {
            ledger: Mutex::new(ledger),
        }
    }

    /// Copy of the current ledger contents.
    pub fn snapshot(&self) -> Result<Ledger, LedgerError> {
        let ledger = self.ledger.lock().map_err(|_| LedgerError::LockPoisoned)?;
        Ok(ledger.clone())
    }
}

impl LedgerStore for MemoryStore {
    fn used_numbers(&self, customer_id: &str) -> Result<BTreeSet<u32>, LedgerError> {
        let ledger = self.ledger.lock().map_err(|_| LedgerError::LockPoisoned)?;
        Ok(ledger.used_numbers(customer_id))
    }

    fn record(&self, customer_id: &str, numbers: &[u32]) -> Result<(), LedgerError> {
        let mut ledger = self.ledger.lock().map_err(|_| LedgerError::LockPoisoned)?;
        ledger.record(customer_id, numbers);
        Ok(())
    }
}
