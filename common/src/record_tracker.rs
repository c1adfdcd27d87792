//! The shared record state for a search.
//!
//! Workers read the current maximum without locking and only take the lock
//! when they think they have beaten it. The lock also owns both output
//! streams, so a record line and the maximum it sets are published together
//! and progress lines never interleave with record lines.

use crate::Record;
use crate::canonical_form::CanonicalForm;
use log::info;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Only persistences above this are reported.
pub const INITIAL_MAX_PERSISTENCE: u32 = 2;

/// Everything guarded by the tracker lock.
#[derive(Debug)]
struct Outputs<O, E> {
    records: O,
    diagnostics: E,
    found: Vec<Record>,
}

/// Monotonic record of the highest persistence seen so far.
#[derive(Debug)]
pub struct RecordTracker<O, E> {
    max_persistence: AtomicU32,
    outputs: Mutex<Outputs<O, E>>,
}

impl<O: Write, E: Write> RecordTracker<O, E> {
    /// Create a tracker writing records to `records` and progress to `diagnostics`.
    pub fn new(records: O, diagnostics: E) -> Self {
        Self {
            max_persistence: AtomicU32::new(INITIAL_MAX_PERSISTENCE),
            outputs: Mutex::new(Outputs {
                records,
                diagnostics,
                found: Vec::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Outputs<O, E>> {
        // A panicking worker takes the whole search down anyway
        self.outputs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The highest persistence recorded so far.
    pub fn max_persistence(&self) -> u32 {
        self.max_persistence.load(Ordering::Relaxed)
    }

    /// Offer a candidate with the given persistence.
    /// Writes a record line and returns true if it beats the current maximum.
    pub fn offer(&self, persistence: u32, form: &CanonicalForm) -> io::Result<bool> {
        // Fast path, a stale read only costs an extra lock
        if persistence <= self.max_persistence() {
            return Ok(false);
        }

        let mut outputs = self.lock();
        if persistence <= self.max_persistence.load(Ordering::Relaxed) {
            return Ok(false);
        }

        let record = Record {
            persistence,
            number: form.to_decimal(),
            digits: form.digit_count(),
        };
        writeln!(outputs.records, "{record}")?;
        outputs.records.flush()?;
        self.max_persistence.store(persistence, Ordering::Relaxed);

        info!(
            "New record: persistence {} at {} digits",
            record.persistence, record.digits
        );
        outputs.found.push(record);
        Ok(true)
    }

    /// Report that every digit count up to `upper_bound` in a bucket is done.
    pub fn finish_bucket(&self, upper_bound: u32) -> io::Result<()> {
        let mut outputs = self.lock();
        writeln!(outputs.diagnostics, "Finished searching at {upper_bound} digits")?;
        outputs.diagnostics.flush()
    }

    /// The records written so far, in the order they were written.
    pub fn records(&self) -> Vec<Record> {
        self.lock().found.clone()
    }

    /// Take back the output streams and the records.
    pub fn into_parts(self) -> (O, E, Vec<Record>) {
        let outputs = self
            .outputs
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        (outputs.records, outputs.diagnostics, outputs.found)
    }
}
