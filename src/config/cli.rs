//! Command-line argument parsing
//!
//! Every option defaults to the reference experiment, so running with no
//! arguments reproduces it.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for results on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Console,
    Json,
    Csv,
}

/// Worker pool lifetime for the pooled strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PoolMode {
    /// New pool created and shut down inside every trial
    Fresh,
    /// One pool created up front and reused by every trial
    Shared,
}

/// Compare sequential, batched, thread-per-batch and pooled execution of CPU-bound work
#[derive(Parser, Debug, Clone)]
#[command(name = "pool-exec-bench")]
#[command(version, about, long_about = None)]
pub struct CliArgs {
    // ===== Workload =====
    /// Total workload invocations per trial
    #[arg(short = 'n', long = "operations", default_value_t = 250_000, allow_negative_numbers = true)]
    pub operations: i64,

    /// Parallelism degree: number of batches and worker pool size
    #[arg(short = 'c', long = "cpus", default_value_t = 8, allow_negative_numbers = true)]
    pub cpus: i64,

    // ===== Trials =====
    /// Timed trials per strategy
    #[arg(short = 'r', long = "repetitions", default_value_t = 120, allow_negative_numbers = true)]
    pub repetitions: i64,

    /// Untimed trials per strategy before measurement
    #[arg(long = "warmup", default_value_t = 0)]
    pub warmup: u32,

    /// Strategies to run, in order (sync, batched, thread, pool)
    #[arg(short = 't', long = "strategies", value_delimiter = ',')]
    pub strategies: Option<Vec<String>>,

    // ===== Pool =====
    /// Seconds to wait for pooled work before failing the run
    #[arg(long = "pool-timeout-secs", default_value_t = 10)]
    pub pool_timeout_secs: u64,

    /// Pool lifetime: fresh per trial, or shared across trials
    #[arg(long = "pool-mode", value_enum, default_value_t = PoolMode::Fresh)]
    pub pool_mode: PoolMode,

    // ===== Output =====
    /// Output format on stdout
    #[arg(long = "output-format", value_enum, default_value_t = OutputFormat::Console)]
    pub output_format: OutputFormat,

    /// Write JSON results to file
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Write CSV results to file
    #[arg(long = "csv")]
    pub csv_output: Option<PathBuf>,

    /// Only errors in the log, no progress bars
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Debug logging and per-trial statistics
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate argument combinations
    pub fn validate(&self) -> Result<(), String> {
        if self.operations < 0 {
            return Err(format!(
                "--operations must not be negative (got {})",
                self.operations
            ));
        }

        if self.cpus <= 0 {
            return Err(format!("--cpus must be greater than zero (got {})", self.cpus));
        }

        if self.repetitions <= 0 {
            return Err(format!(
                "--repetitions must be greater than zero (got {})",
                self.repetitions
            ));
        }

        if self.pool_timeout_secs == 0 {
            return Err("--pool-timeout-secs must be greater than zero".to_string());
        }

        if self.quiet && self.verbose {
            return Err("--quiet and --verbose are mutually exclusive".to_string());
        }

        if let Some(ref strategies) = self.strategies {
            if strategies.is_empty() {
                return Err("--strategies must name at least one strategy".to_string());
            }
        }

        Ok(())
    }
}
