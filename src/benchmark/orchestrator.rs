//! Benchmark orchestrator
//!
//! Builds the partition once, runs the configured number of timed trials per
//! strategy and aggregates the elapsed time. The first failed trial aborts the
//! whole run.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use super::executor::Executor;
use super::strategy::Strategy;
use crate::config::BenchmarkConfig;
use crate::metrics::{AggregateResult, MetricsReporter, TrialCollector, TrialMeasurement};
use crate::utils::Result;
use crate::workload::{Partition, Workload};

/// Benchmark orchestrator
pub struct Orchestrator {
    config: Arc<BenchmarkConfig>,
    executor: Executor,
    reporter: MetricsReporter,
}

impl Orchestrator {
    /// Create new orchestrator
    ///
    /// Fails on invalid configuration before any trial runs.
    pub fn new(config: BenchmarkConfig, workload: Arc<dyn Workload>) -> Result<Self> {
        config.validate()?;

        let partition = Arc::new(Partition::new(
            config.total_operations,
            config.parallelism,
        )?);
        if partition.remainder() > 0 {
            info!(
                "{} operations do not divide into {} batches; batched strategies drop {}",
                format_count(config.total_operations),
                partition.degree(),
                partition.remainder()
            );
        }

        let executor = Executor::new(
            workload,
            partition,
            config.pool_timeout,
            config.pool_mode,
        )?;
        let reporter = MetricsReporter::new(config.output_format);

        Ok(Self {
            config: Arc::new(config),
            executor,
            reporter,
        })
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    pub fn partition(&self) -> &Partition {
        self.executor.partition()
    }

    /// Run and time a single trial
    pub fn run_trial(&self, strategy: Strategy) -> Result<TrialMeasurement> {
        let start = Instant::now();
        self.executor.run(strategy)?;
        let elapsed = start.elapsed();

        Ok(TrialMeasurement { strategy, elapsed })
    }

    /// Run warmup plus all timed trials for one strategy
    pub fn run_strategy(&self, strategy: Strategy) -> Result<AggregateResult> {
        for _ in 0..self.config.warmup {
            self.executor.run(strategy)?;
        }

        let pb = self.progress_bar(strategy);
        let mut collector = TrialCollector::new(strategy);

        for trial_no in 0..self.config.repetitions {
            let trial = self.run_trial(strategy)?;
            debug!(
                strategy = strategy.as_str(),
                trial = trial_no,
                elapsed_us = trial.elapsed.as_micros() as u64,
                "Trial complete"
            );
            collector.record(&trial);
            pb.inc(1);
        }

        pb.finish_and_clear();

        Ok(collector.finish(
            self.executor.operations_per_trial(strategy),
            self.partition().degree(),
        ))
    }

    /// Run all configured strategies in order
    pub fn run_all(&self) -> Result<Vec<AggregateResult>> {
        let mut results = Vec::with_capacity(self.config.strategies.len());

        for &strategy in &self.config.strategies {
            info!(
                "Running {}: {} ops x {} trials",
                strategy,
                format_count(self.executor.operations_per_trial(strategy)),
                self.config.repetitions
            );

            let result = self.run_strategy(strategy)?;
            self.reporter.report_strategy(&result, self.config.verbose);
            results.push(result);
        }

        self.reporter.report_all(&results)?;
        Ok(results)
    }

    /// Export results to JSON file
    pub fn export_json(&self, results: &[AggregateResult], path: &Path) -> Result<()> {
        MetricsReporter::write_json_file(path, results)
    }

    /// Export results to CSV file
    pub fn export_csv(&self, results: &[AggregateResult], path: &Path) -> Result<()> {
        MetricsReporter::write_csv_file(path, results)
    }

    fn progress_bar(&self, strategy: Strategy) -> ProgressBar {
        if self.config.quiet {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(self.config.repetitions as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb.set_message(strategy.as_str());
        pb
    }
}

/// Format large numbers with thousands separators
/// Examples: 1,234,567 or 987,654
pub fn format_count(value: u64) -> String {
    let s = value.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}
