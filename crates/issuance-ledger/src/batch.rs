//! Expansion of one starting number into the numbers a single run consumes.

use serde::Serialize;

use crate::AllocationError;

/// Display suffixes for the items of one batch, in order.
///
/// The second and third items share suffix 2 while still consuming two
/// distinct numbers.
pub const SUFFIX_PATTERN: [u8; 4] = [1, 2, 2, 3];

/// One rendered barcode in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchItem {
    pub suffix: u8,
    pub number: u32,
}

/// The ordered items consumed by one issuance run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuedBatch {
    items: Vec<BatchItem>,
}

impl IssuedBatch {
    pub fn items(&self) -> &[BatchItem] {
        &self.items
    }

    /// The starting (largest) number of the batch.
    pub fn start(&self) -> u32 {
        self.items.first().map_or(0, |item| item.number)
    }

    /// Flattened numbers, in batch order.
    pub fn numbers(&self) -> Vec<u32> {
        self.items.iter().map(|item| item.number).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Count down from `start`, one number per entry of [`SUFFIX_PATTERN`].
pub fn expand(start: u32) -> Result<IssuedBatch, AllocationError> {
    let items = SUFFIX_PATTERN
        .iter()
        .zip(0u32..)
        .map(|(&suffix, offset)| {
            start
                .checked_sub(offset)
                .map(|number| BatchItem { suffix, number })
        })
        .collect::<Option<Vec<_>>>()
        .ok_or(AllocationError::BatchUnderflow {
            start,
            len: SUFFIX_PATTERN.len(),
        })?;
    Ok(IssuedBatch { items })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_counts_down_with_repeated_suffix() {
        let batch = expand(1_000_000).unwrap();
        assert_eq!(batch.numbers(), vec![1_000_000, 999_999, 999_998, 999_997]);
        let suffixes: Vec<u8> = batch.items().iter().map(|i| i.suffix).collect();
        assert_eq!(suffixes, vec![1, 2, 2, 3]);
        assert_eq!(batch.start(), 1_000_000);
        assert_eq!(batch.len(), 4);
    }

    #[test]
    fn expand_smallest_valid_start() {
        assert_eq!(expand(3).unwrap().numbers(), vec![3, 2, 1, 0]);
    }

    #[test]
    fn expand_rejects_underflow() {
        for start in 0..3 {
            assert!(matches!(
                expand(start),
                Err(AllocationError::BatchUnderflow { .. })
            ));
        }
    }
}
