//! Starting-number selection for an issuance batch.
//!
//! Numbers for a customer only ever go down: without an explicit request the
//! allocator steps to one below the smallest number already issued, so
//! manually requested gaps never need a separate counter.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use rand::Rng;
use rand::rngs::OsRng;
use regex::Regex;

use crate::{LedgerError, LedgerStore};

/// Number of decimal digits in a requested number.
pub const NUMBER_LEN: usize = 7;

/// Lower bound of the random first number for a new customer.
pub const RANDOM_MIN: u32 = 4_444_444;

/// Upper bound (inclusive) of the random first number for a new customer.
pub const RANDOM_MAX: u32 = 9_999_999;

static RE_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{7}$").unwrap());

#[derive(Debug, thiserror::Error)]
pub enum AllocationError {
    #[error("customer id must not be empty")]
    EmptyCustomerId,

    #[error("number must be exactly 7 decimal digits, got {0:?}")]
    InvalidFormat(String),

    #[error(
        "number {number} is already used for customer {customer_id:?}; \
         the smallest used number is {smallest_used}, pick a number below it"
    )]
    AlreadyUsed {
        customer_id: String,
        number: u32,
        smallest_used: u32,
    },

    #[error("no numbers left for customer {0:?}: 0 has already been issued")]
    Exhausted(String),

    #[error("cannot expand a batch of {len} numbers counting down from {start}")]
    BatchUnderflow { start: u32, len: usize },

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Check that `value` is exactly seven ASCII digits and parse it.
pub fn validate_number(value: &str) -> Result<u32, AllocationError> {
    if !RE_NUMBER.is_match(value) {
        return Err(AllocationError::InvalidFormat(value.to_string()));
    }
    value
        .parse()
        .map_err(|_| AllocationError::InvalidFormat(value.to_string()))
}

/// The number an unrequested allocation returns for a non-empty used set.
///
/// `None` when the set is empty or its smallest number is 0.
pub fn next_candidate(used: &BTreeSet<u32>) -> Option<u32> {
    used.first().and_then(|min| min.checked_sub(1))
}

/// Picks starting numbers against an injected ledger store.
pub struct Allocator<S> {
    store: S,
}

impl<S: LedgerStore> Allocator<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Decide the starting number for `customer_id`.
    pub fn allocate(
        &self,
        customer_id: &str,
        requested: Option<&str>,
    ) -> Result<u32, AllocationError> {
        let mut rng = OsRng;
        self.allocate_with_rng(customer_id, requested, &mut rng)
    }

    pub fn allocate_with_rng<R: Rng + ?Sized>(
        &self,
        customer_id: &str,
        requested: Option<&str>,
        rng: &mut R,
    ) -> Result<u32, AllocationError> {
        if customer_id.trim().is_empty() {
            return Err(AllocationError::EmptyCustomerId);
        }
        let requested = requested.map(validate_number).transpose()?;

        let used = self.store.used_numbers(customer_id)?;

        let Some(number) = requested else {
            let Some(&smallest) = used.first() else {
                let number = rng.gen_range(RANDOM_MIN..=RANDOM_MAX);
                tracing::debug!(customer_id, number, "New customer, drew random number");
                return Ok(number);
            };
            let number = smallest
                .checked_sub(1)
                .ok_or_else(|| AllocationError::Exhausted(customer_id.to_string()))?;
            tracing::debug!(customer_id, number, "Stepping below smallest used number");
            return Ok(number);
        };

        if used.contains(&number) {
            let smallest_used = used.first().copied().unwrap_or(number);
            return Err(AllocationError::AlreadyUsed {
                customer_id: customer_id.to_string(),
                number,
                smallest_used,
            });
        }

        Ok(number)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::{Ledger, MemoryStore};

    fn store_with(customer_id: &str, numbers: &[u32]) -> MemoryStore {
        let mut ledger = Ledger::new();
        ledger.record(customer_id, numbers);
        MemoryStore::from_ledger(ledger)
    }

    #[test]
    fn new_customer_draws_from_random_range() {
        let allocator = Allocator::new(MemoryStore::new());
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let n = allocator.allocate_with_rng("acme", None, &mut rng).unwrap();
            assert!((RANDOM_MIN..=RANDOM_MAX).contains(&n), "{n} out of range");
        }
    }

    #[test]
    fn random_draw_is_deterministic_for_a_seed() {
        let allocator = Allocator::new(MemoryStore::new());
        let a = allocator
            .allocate_with_rng("acme", None, &mut StdRng::seed_from_u64(7))
            .unwrap();
        let b = allocator
            .allocate_with_rng("acme", None, &mut StdRng::seed_from_u64(7))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn steps_below_smallest_used() {
        let allocator = Allocator::new(store_with("acme", &[100]));
        assert_eq!(allocator.allocate("acme", None).unwrap(), 99);

        let allocator = Allocator::new(store_with("acme", &[5_000_000, 4_999_997, 6_000_000]));
        assert_eq!(allocator.allocate("acme", None).unwrap(), 4_999_996);
    }

    #[test]
    fn used_numbers_are_scoped_per_customer() {
        let allocator = Allocator::new(store_with("acme", &[100]));
        assert_eq!(allocator.allocate("globex", Some("0000100")).unwrap(), 100);
    }

    #[test]
    fn requested_number_is_returned_unchanged() {
        let allocator = Allocator::new(store_with("acme", &[100]));
        assert_eq!(allocator.allocate("acme", Some("1234567")).unwrap(), 1_234_567);
        assert_eq!(allocator.allocate("acme", Some("0000099")).unwrap(), 99);
    }

    #[test]
    fn requested_used_number_is_rejected_with_guidance() {
        let allocator = Allocator::new(store_with("acme", &[100, 250]));
        let err = allocator.allocate("acme", Some("0000250")).unwrap_err();
        match &err {
            AllocationError::AlreadyUsed {
                number,
                smallest_used,
                ..
            } => {
                assert_eq!(*number, 250);
                assert_eq!(*smallest_used, 100);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("100"));
    }

    #[test]
    fn already_used_message_mentions_smallest() {
        let allocator = Allocator::new(store_with("acme", &[100]));
        let err = allocator.allocate("acme", Some("0000100")).unwrap_err();
        assert!(matches!(err, AllocationError::AlreadyUsed { .. }));
        assert!(err.to_string().contains("100"));
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        let allocator = Allocator::new(MemoryStore::new());
        for bad in ["", "123456", "12345678", "12a4567", " 123456", "-123456", "１２３４５６７"] {
            let err = allocator.allocate("acme", Some(bad)).unwrap_err();
            assert!(
                matches!(err, AllocationError::InvalidFormat(_)),
                "{bad:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn empty_customer_id_is_rejected() {
        let allocator = Allocator::new(MemoryStore::new());
        assert!(matches!(
            allocator.allocate("  ", None),
            Err(AllocationError::EmptyCustomerId)
        ));
    }

    #[test]
    fn zero_used_exhausts_customer() {
        let allocator = Allocator::new(store_with("acme", &[0, 3]));
        assert!(matches!(
            allocator.allocate("acme", None),
            Err(AllocationError::Exhausted(_))
        ));
    }

    #[test]
    fn next_candidate_cases() {
        assert_eq!(next_candidate(&BTreeSet::new()), None);
        assert_eq!(next_candidate(&BTreeSet::from([0])), None);
        assert_eq!(next_candidate(&BTreeSet::from([100, 50])), Some(49));
    }
}
