//! A module with some basic offline benchmarking presets.

use clap::ValueEnum;
use std::fmt;

/// Different benchmark strategies.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum BenchmarkMode {
    /// A quick smoke test: up to 50 digits.
    Small,
    /// The default search bound: up to 100 digits.
    Default,
    /// Up to 200 digits, two progress buckets.
    Large,
    /// Up to 400 digits. Expect this one to take a while.
    ExtraLarge,
}

/// Get the digit bound searched by a benchmark preset.
#[must_use]
pub fn get_benchmark_max_digits(mode: BenchmarkMode) -> u32 {
    match mode {
        BenchmarkMode::Small => 50,
        BenchmarkMode::Default => 100,
        BenchmarkMode::Large => 200,
        BenchmarkMode::ExtraLarge => 400,
    }
}

impl fmt::Display for BenchmarkMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_MAX_DIGITS;

    #[test]
    fn test_get_benchmark_max_digits() {
        assert_eq!(
            get_benchmark_max_digits(BenchmarkMode::Default),
            DEFAULT_MAX_DIGITS
        );
        let bounds: Vec<u32> = BenchmarkMode::value_variants()
            .iter()
            .map(|mode| get_benchmark_max_digits(*mode))
            .collect();
        assert!(bounds.windows(2).all(|w| w[0] < w[1]));
    }
}
