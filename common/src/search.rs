//! A module that drives the record search over every digit count.
//!
//! The cost of a digit count grows polynomially with the count, so splitting
//! `2..=max_digits` into equal static chunks would leave most threads idle
//! while one grinds through the largest counts. Instead every digit count is
//! its own rayon task and idle threads steal the next one.

use crate::canonical_form::{candidate_count, canonical_forms};
use crate::digit_buckets::DigitBuckets;
use crate::digit_product::persistence;
use crate::record_tracker::RecordTracker;
use crate::{Schedule, SearchSummary};
use log::{debug, info, trace};
use rayon::prelude::*;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};

/// Evaluate every canonical form with exactly `digits` digits.
/// Returns the number of forms checked.
pub fn search_digit_count<O: Write, E: Write>(
    digits: u32,
    tracker: &RecordTracker<O, E>,
) -> io::Result<u64> {
    trace!("Starting {} digits ({} candidates)", digits, candidate_count(digits));
    let mut checked = 0;
    for form in canonical_forms(digits) {
        // The value is already the first digit product of the form
        let form_persistence = 1 + persistence(form.value());
        tracker.offer(form_persistence, &form)?;
        checked += 1;
    }
    Ok(checked)
}

/// Search every digit count in `2..=max_digits`, reporting records and
/// finished buckets through the tracker. Stops at the first write error.
pub fn run<O, E>(
    max_digits: u32,
    schedule: Schedule,
    tracker: &RecordTracker<O, E>,
) -> io::Result<SearchSummary>
where
    O: Write + Send,
    E: Write + Send,
{
    let buckets = DigitBuckets::new(max_digits);
    let candidates_checked = AtomicU64::new(0);
    info!(
        "Searching 2 to {} digits ({} schedule, {} progress buckets)",
        max_digits,
        schedule,
        buckets.len()
    );

    let search_digits = |digits: u32| -> io::Result<()> {
        let checked = search_digit_count(digits, tracker)?;
        candidates_checked.fetch_add(checked, Ordering::Relaxed);
        debug!("Finished {digits} digits after {checked} candidates");

        if let Some(upper_bound) = buckets.complete(digits) {
            tracker.finish_bucket(upper_bound)?;
        }
        Ok(())
    };

    match schedule {
        Schedule::Sequential => (2..=max_digits).try_for_each(search_digits)?,
        // Inclusive u32 ranges are not indexed in rayon, so use the half-open form
        Schedule::Parallel => (2..max_digits.saturating_add(1))
            .into_par_iter()
            .with_max_len(1)
            .try_for_each(search_digits)?,
    }

    let summary = SearchSummary {
        max_digits,
        schedule,
        candidates_checked: candidates_checked.into_inner(),
        records: tracker.records(),
    };
    info!(
        "Search complete: {} candidates, highest persistence {}",
        summary.candidates_checked,
        tracker.max_persistence()
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_strings(max_digits: u32, schedule: Schedule) -> (String, String, SearchSummary) {
        let tracker = RecordTracker::new(Vec::new(), Vec::new());
        let summary = run(max_digits, schedule, &tracker).unwrap();
        let (records, diagnostics, _) = tracker.into_parts();
        (
            String::from_utf8(records).unwrap(),
            String::from_utf8(diagnostics).unwrap(),
            summary,
        )
    }

    #[test_log::test]
    fn sequential_search_to_twelve_digits() {
        let (records, diagnostics, summary) = run_to_strings(12, Schedule::Sequential);
        assert_eq!(
            records,
            "03:  39\n\
             04:  77\n\
             05:  679\n\
             06:  6788\n\
             07:  68889\n\
             08:  2677889\n\
             09:  26888999\n\
             10:  3778888999\n"
        );
        assert_eq!(diagnostics, "Finished searching at 12 digits\n");
        assert_eq!(summary.records.len(), 8);
        assert_eq!(
            summary.candidates_checked,
            (2..=12).map(candidate_count).sum::<u64>()
        );
    }

    #[test_log::test]
    fn sequential_search_finds_eleven() {
        let (records, _, summary) = run_to_strings(15, Schedule::Sequential);
        assert!(records.ends_with("11:  277777788888899\n"), "{records}");
        let persistences: Vec<u32> = summary.records.iter().map(|r| r.persistence).collect();
        assert_eq!(persistences, (3..=11).collect::<Vec<u32>>());
        assert_eq!(summary.records[8].digits, 15);
    }

    #[test_log::test]
    fn parallel_search_is_monotonic() {
        let (records, diagnostics, summary) = run_to_strings(12, Schedule::Parallel);
        let persistences: Vec<u32> = summary.records.iter().map(|r| r.persistence).collect();
        assert!(persistences.windows(2).all(|w| w[0] < w[1]), "{persistences:?}");
        assert_eq!(persistences.last(), Some(&10));
        assert_eq!(records.lines().count(), summary.records.len());
        assert_eq!(diagnostics, "Finished searching at 12 digits\n");
    }

    #[test_log::test]
    fn parallel_search_covers_every_digit_count() {
        let (_, diagnostics, summary) = run_to_strings(20, Schedule::Parallel);
        assert_eq!(
            summary.candidates_checked,
            (2..=20).map(candidate_count).sum::<u64>()
        );
        assert_eq!(diagnostics, "Finished searching at 20 digits\n");
    }

    #[test_log::test]
    fn progress_line_per_bucket() {
        let (records, diagnostics, _) = run_to_strings(110, Schedule::Sequential);
        assert!(records.ends_with("11:  277777788888899\n"), "{records}");
        assert_eq!(
            diagnostics,
            "Finished searching at 100 digits\nFinished searching at 110 digits\n"
        );
    }

    #[test_log::test]
    fn nothing_below_two_digits() {
        let (records, diagnostics, summary) = run_to_strings(1, Schedule::Parallel);
        assert!(records.is_empty());
        assert!(diagnostics.is_empty());
        assert_eq!(summary.candidates_checked, 0);
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test_log::test]
    fn write_failure_stops_the_search() {
        let tracker = RecordTracker::new(BrokenPipe, Vec::new());
        let err = run(20, Schedule::Parallel, &tracker).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert_eq!(tracker.records(), Vec::new());
    }
}
