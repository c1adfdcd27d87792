//! A library with common utilities for searching multiplicative persistence records.

pub mod benchmark;
pub mod canonical_form;
pub mod digit_buckets;
pub mod digit_product;
pub mod record_tracker;
pub mod search;

use serde::Serialize;
use std::fmt;

pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DEFAULT_MAX_DIGITS: u32 = 100;

/// How the digit counts are distributed over threads.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum Schedule {
    /// Every digit count in increasing order on the calling thread.
    /// Records are then printed smallest digit count first.
    Sequential,
    /// One task per digit count on the rayon pool, claimed dynamically.
    Parallel,
}

/// A new maximum persistence and the canonical number that reached it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub persistence: u32,
    pub number: String,
    pub digits: u32,
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:02}:  {}", self.persistence, self.number)
    }
}

/// The compiled results of a finished search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchSummary {
    pub max_digits: u32,
    pub schedule: Schedule,
    pub candidates_checked: u64,
    pub records: Vec<Record>,
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Schedule::Sequential => write!(f, "sequential"),
            Schedule::Parallel => write!(f, "parallel"),
        }
    }
}
