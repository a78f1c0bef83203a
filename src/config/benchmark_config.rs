//! Benchmark configuration derived from CLI arguments

use std::path::PathBuf;
use std::time::Duration;

use super::cli::{CliArgs, OutputFormat, PoolMode};
use crate::benchmark::Strategy;
use crate::utils::{BenchmarkError, Result};

pub const DEFAULT_OPERATIONS: u64 = 250_000;
pub const DEFAULT_PARALLELISM: usize = 8;
pub const DEFAULT_REPETITIONS: u32 = 120;
pub const DEFAULT_POOL_TIMEOUT: Duration = Duration::from_secs(10);

/// Complete benchmark configuration
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    // Workload
    pub total_operations: u64,
    pub parallelism: usize,

    // Trials
    pub repetitions: u32,
    pub warmup: u32,
    pub strategies: Vec<Strategy>,

    // Pool
    pub pool_timeout: Duration,
    pub pool_mode: PoolMode,

    // Output
    pub output_format: OutputFormat,
    pub output_path: Option<PathBuf>,
    pub csv_output: Option<PathBuf>,
    pub quiet: bool,
    pub verbose: bool,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            total_operations: DEFAULT_OPERATIONS,
            parallelism: DEFAULT_PARALLELISM,
            repetitions: DEFAULT_REPETITIONS,
            warmup: 0,
            strategies: Strategy::ALL.to_vec(),
            pool_timeout: DEFAULT_POOL_TIMEOUT,
            pool_mode: PoolMode::Fresh,
            output_format: OutputFormat::Console,
            output_path: None,
            csv_output: None,
            quiet: false,
            verbose: false,
        }
    }
}

impl BenchmarkConfig {
    /// Create configuration from CLI arguments
    pub fn from_cli(args: &CliArgs) -> Result<Self> {
        // Validate first
        args.validate().map_err(BenchmarkError::Config)?;

        let strategies = match args.strategies {
            Some(ref names) => names
                .iter()
                .map(|name| {
                    Strategy::parse(name).ok_or_else(|| {
                        BenchmarkError::Config(format!("Unknown strategy: {}", name))
                    })
                })
                .collect::<Result<Vec<_>>>()?,
            None => Strategy::ALL.to_vec(),
        };

        let config = Self {
            total_operations: to_unsigned(args.operations, "operations")?,
            parallelism: to_unsigned(args.cpus, "cpus")?,
            repetitions: to_unsigned(args.repetitions, "repetitions")?,
            warmup: args.warmup,
            strategies,
            pool_timeout: Duration::from_secs(args.pool_timeout_secs),
            pool_mode: args.pool_mode,
            output_format: args.output_format,
            output_path: args.output.clone(),
            csv_output: args.csv_output.clone(),
            quiet: args.quiet,
            verbose: args.verbose,
        };

        config.validate()?;
        Ok(config)
    }

    /// Check invariants the driver relies on
    pub fn validate(&self) -> Result<()> {
        if self.parallelism == 0 {
            return Err(BenchmarkError::Config(
                "parallelism degree must be greater than zero".to_string(),
            ));
        }
        if self.repetitions == 0 {
            return Err(BenchmarkError::Config(
                "repetitions must be greater than zero".to_string(),
            ));
        }
        if self.pool_timeout.is_zero() {
            return Err(BenchmarkError::Config(
                "pool timeout must be greater than zero".to_string(),
            ));
        }
        if self.strategies.is_empty() {
            return Err(BenchmarkError::Config(
                "at least one strategy must be selected".to_string(),
            ));
        }
        Ok(())
    }

    /// One-line summary for logs and exports
    pub fn summary(&self) -> String {
        format!(
            "operations={}, cpus={}, repetitions={}, warmup={}, pool_mode={:?}, pool_timeout={:?}",
            self.total_operations,
            self.parallelism,
            self.repetitions,
            self.warmup,
            self.pool_mode,
            self.pool_timeout
        )
    }
}

fn to_unsigned<T: TryFrom<i64>>(value: i64, name: &str) -> Result<T> {
    T::try_from(value)
        .map_err(|_| BenchmarkError::Config(format!("{} out of range: {}", name, value)))
}
