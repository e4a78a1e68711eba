//! Whole-document ledger shared by the JSON and in-memory stores.

use std::collections::{BTreeMap, BTreeSet};
use std::io::{ErrorKind, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::LedgerError;

/// Mapping from customer id to the numbers already issued to that customer.
///
/// Serializes as a JSON object of integer arrays. Duplicates in a persisted
/// array collapse on load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    customers: BTreeMap<String, BTreeSet<u32>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Numbers issued to `customer_id`, empty if the customer is unknown.
    pub fn used_numbers(&self, customer_id: &str) -> BTreeSet<u32> {
        self.customers.get(customer_id).cloned().unwrap_or_default()
    }

    /// Union `numbers` into the customer's set. Returns how many were new.
    pub fn record(&mut self, customer_id: &str, numbers: &[u32]) -> usize {
        let used = self.customers.entry(customer_id.to_string()).or_default();
        numbers.iter().filter(|n| used.insert(**n)).count()
    }

    pub fn customers(&self) -> impl Iterator<Item = (&str, &BTreeSet<u32>)> {
        self.customers.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Load the ledger document at `path`. A missing file is an empty ledger.
    pub fn load(path: &Path) -> Result<Self, LedgerError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Ledger file absent, starting empty");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(LedgerError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        serde_json::from_str(&text).map_err(|source| LedgerError::StoreCorrupt {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the whole ledger to `path`.
    ///
    /// The document is written to a sibling temp file and renamed into place,
    /// so readers see either the old or the new document.
    pub fn save(&self, path: &Path) -> Result<(), LedgerError> {
        let io_err = |source| LedgerError::Io {
            path: path.to_path_buf(),
            source,
        };

        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(io_err)?;

        let json = serde_json::to_string_pretty(self).map_err(LedgerError::Serialize)?;
        let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
        tmp.write_all(json.as_bytes()).map_err(io_err)?;
        tmp.write_all(b"\n").map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;
        tmp.persist(path).map_err(|e| io_err(e.error))?;
        Ok(())
    }
}
