//! Progress bookkeeping for the digit-count loop.
//!
//! Digit counts are grouped into buckets of [`DIGIT_BUCKET_SIZE`]. Each bucket
//! counts down as its digit counts finish, in whatever order the workers get
//! to them, and the worker that empties a bucket reports it.

use std::sync::atomic::{AtomicU32, Ordering};

/// Width of one progress bucket, in digits.
pub const DIGIT_BUCKET_SIZE: u32 = 100;

/// Countdowns of unfinished digit counts for each bucket of `2..=max_digits`.
#[derive(Debug)]
pub struct DigitBuckets {
    max_digits: u32,
    remaining: Vec<AtomicU32>,
}

impl DigitBuckets {
    /// Set up the buckets for a search over `2..=max_digits`.
    #[must_use]
    pub fn new(max_digits: u32) -> Self {
        if max_digits < 2 {
            return Self {
                max_digits,
                remaining: Vec::new(),
            };
        }

        let remaining = (0..max_digits.div_ceil(DIGIT_BUCKET_SIZE))
            .map(|bucket| {
                let start = bucket * DIGIT_BUCKET_SIZE;
                let size = (max_digits - start).min(DIGIT_BUCKET_SIZE);
                // The first bucket nominally holds 1 digit, which is never searched
                let size = if bucket == 0 { size - 1 } else { size };
                AtomicU32::new(size)
            })
            .collect();

        Self {
            max_digits,
            remaining,
        }
    }

    /// Which bucket a digit count belongs to.
    #[must_use]
    pub fn bucket_of(digits: u32) -> usize {
        ((digits - 1) / DIGIT_BUCKET_SIZE) as usize
    }

    /// The largest digit count covered by a bucket.
    #[must_use]
    pub fn upper_bound(&self, bucket: usize) -> u32 {
        ((bucket as u32 + 1) * DIGIT_BUCKET_SIZE).min(self.max_digits)
    }

    /// Number of buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Mark one digit count as finished.
    /// Returns the bucket's upper bound if this was the last one outstanding.
    pub fn complete(&self, digits: u32) -> Option<u32> {
        let bucket = Self::bucket_of(digits);
        let counter = self.remaining.get(bucket)?;
        if counter.fetch_sub(1, Ordering::AcqRel) == 1 {
            Some(self.upper_bound(bucket))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn single_short_bucket() {
        let buckets = DigitBuckets::new(12);
        assert_eq!(buckets.len(), 1);
        for digits in 2..12 {
            assert_eq!(buckets.complete(digits), None);
        }
        assert_eq!(buckets.complete(12), Some(12));
    }

    #[test_log::test]
    fn exactly_one_hundred() {
        let buckets = DigitBuckets::new(100);
        assert_eq!(buckets.len(), 1);
        let finished: Vec<u32> = (2..=100).rev().filter_map(|d| buckets.complete(d)).collect();
        assert_eq!(finished, [100]);
    }

    #[test_log::test]
    fn buckets_finish_out_of_order() {
        let buckets = DigitBuckets::new(250);
        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets.upper_bound(0), 100);
        assert_eq!(buckets.upper_bound(1), 200);
        assert_eq!(buckets.upper_bound(2), 250);

        let mut finished = Vec::new();
        for digits in (201..=250).chain(101..=200).chain(2..=100) {
            finished.extend(buckets.complete(digits));
        }
        assert_eq!(finished, [250, 200, 100]);
    }

    #[test_log::test]
    fn bucket_boundaries() {
        assert_eq!(DigitBuckets::bucket_of(2), 0);
        assert_eq!(DigitBuckets::bucket_of(100), 0);
        assert_eq!(DigitBuckets::bucket_of(101), 1);
        assert_eq!(DigitBuckets::bucket_of(200), 1);
    }

    #[test_log::test]
    fn nothing_to_search() {
        assert!(DigitBuckets::new(0).is_empty());
        assert!(DigitBuckets::new(1).is_empty());
        assert_eq!(DigitBuckets::new(1).complete(5), None);
    }
}
