//! A simple CLI for the persistence library.

#![warn(clippy::all, clippy::pedantic)]

extern crate persistence_common;
use persistence_common::benchmark::{BenchmarkMode, get_benchmark_max_digits};
use persistence_common::digit_product::persistence_trajectory;
use persistence_common::record_tracker::RecordTracker;
use persistence_common::{CLIENT_VERSION, DEFAULT_MAX_DIGITS, Schedule, search};

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use malachite::natural::Natural;
use std::io::{self, Write};
use std::str::FromStr;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Search every digit count from 2 up to this many digits
    #[arg(
        default_value_t = DEFAULT_MAX_DIGITS,
        env = "PERSISTENCE_MAX_DIGITS",
        value_parser = clap::value_parser!(u32).range(2..)
    )]
    max_digits: u32,

    /// Run parallel with this many threads (0 for one per logical CPU, 1 to run in order)
    #[arg(short, long, default_value_t = 0, env = "PERSISTENCE_THREADS")]
    threads: usize,

    /// Print the digit-product chain of a single number instead of searching
    #[arg(short, long)]
    number: Option<String>,

    /// Run an offline benchmark, overriding the digit bound
    #[arg(short, long, env = "PERSISTENCE_BENCHMARK")]
    benchmark: Option<BenchmarkMode>,

    /// Suppress progress output
    #[arg(short, long, env = "PERSISTENCE_QUIET")]
    quiet: bool,

    /// Show additional output
    #[arg(short, long, env = "PERSISTENCE_VERBOSE")]
    verbose: bool,
}

/// Print every step from `number` down to a single digit, then its persistence.
fn inspect_number(number: &str) -> Result<()> {
    let n = Natural::from_str(number.trim())
        .map_err(|_| anyhow::anyhow!("{number:?} is not a non-negative decimal integer"))?;

    let trajectory = persistence_trajectory(n);
    let mut stdout = io::stdout().lock();
    for (step, value) in trajectory.iter().enumerate() {
        writeln!(stdout, "{step:02}:  {value}")?;
    }
    writeln!(stdout, "Persistence: {}", trajectory.len() - 1)?;
    Ok(())
}

fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Set up logger
    env_logger::init();

    if cli.verbose {
        eprintln!("CLI Inputs: {cli:?}");
    }

    if let Some(number) = &cli.number {
        return inspect_number(number);
    }

    let max_digits = cli.benchmark.map_or(cli.max_digits, get_benchmark_max_digits);
    let schedule = if cli.threads == 1 {
        Schedule::Sequential
    } else {
        Schedule::Parallel
    };

    // Configure Rayon for the digit-count loop
    rayon::ThreadPoolBuilder::new()
        .num_threads(cli.threads)
        .build_global()
        .context("Failed to build the worker thread pool")?;

    info!(
        "Persistence Client v{} searching up to {} digits, {} schedule on {} threads.",
        CLIENT_VERSION,
        max_digits,
        schedule,
        rayon::current_num_threads()
    );
    if let Some(benchmark) = cli.benchmark {
        info!("Beginning benchmark: {benchmark}");
    }

    let diagnostics: Box<dyn Write + Send> = if cli.quiet {
        Box::new(io::sink())
    } else {
        Box::new(io::stderr())
    };
    let tracker = RecordTracker::new(io::stdout(), diagnostics);

    let start_time = Instant::now();
    let summary = search::run(max_digits, schedule, &tracker)
        .with_context(|| format!("Search up to {max_digits} digits failed"))?;
    let elapsed = start_time.elapsed();
    debug!("Search took {elapsed:?}");

    #[allow(clippy::cast_precision_loss)]
    if cli.benchmark.is_some() && !cli.quiet {
        eprintln!(
            "✓ Checked {} candidates up to {} digits in {:.2}s ({:.2e} candidates/sec)",
            summary.candidates_checked,
            max_digits,
            elapsed.as_secs_f64(),
            summary.candidates_checked as f64 / elapsed.as_secs_f64()
        );
    }

    if cli.verbose {
        eprintln!(
            "Search Summary: {}",
            serde_json::to_string_pretty(&summary)
                .context("Failed to serialize the search summary")?
        );
    }

    Ok(())
}
