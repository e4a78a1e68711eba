//! Ledger storage backends.

mod json;
mod memory;
mod sqlite;

use std::collections::BTreeSet;

pub use json::JsonFileStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::LedgerError;

/// Durable per-customer record of issued numbers.
pub trait LedgerStore {
    /// Numbers already issued to `customer_id`.
    ///
    /// An unknown customer or a store that does not exist yet yields an
    /// empty set.
    fn used_numbers(&self, customer_id: &str) -> Result<BTreeSet<u32>, LedgerError>;

    /// Add `numbers` to the customer's used set. Numbers already present are
    /// ignored.
    fn record(&self, customer_id: &str, numbers: &[u32]) -> Result<(), LedgerError>;
}

impl<S: LedgerStore + ?Sized> LedgerStore for &S {
    fn used_numbers(&self, customer_id: &str) -> Result<BTreeSet<u32>, LedgerError> {
        (**self).used_numbers(customer_id)
    }

    fn record(&self, customer_id: &str, numbers: &[u32]) -> Result<(), LedgerError> {
        (**self).record(customer_id, numbers)
    }
}

impl<S: LedgerStore + ?Sized> LedgerStore for Box<S> {
    fn used_numbers(&self, customer_id: &str) -> Result<BTreeSet<u32>, LedgerError> {
        (**self).used_numbers(customer_id)
    }

    fn record(&self, customer_id: &str, numbers: &[u32]) -> Result<(), LedgerError> {
        (**self).record(customer_id, numbers)
    }
}
