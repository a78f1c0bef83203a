//! Per-strategy trial accumulation
//!
//! The reported number is the plain sum of per-trial milliseconds. The
//! histogram keeps microsecond resolution for the distribution summary.

use std::time::Duration;

use hdrhistogram::Histogram;

use crate::benchmark::Strategy;

/// One timed execution of a strategy
#[derive(Debug, Clone, Copy)]
pub struct TrialMeasurement {
    pub strategy: Strategy,
    pub elapsed: Duration,
}

impl TrialMeasurement {
    /// Whole milliseconds, truncated
    pub fn elapsed_millis(&self) -> u64 {
        self.elapsed.as_millis() as u64
    }
}

/// Running totals over all trials of one strategy
pub struct TrialCollector {
    strategy: Strategy,
    total_millis: u64,
    total_elapsed: Duration,
    trials: u64,
    histogram: Histogram<u64>,
}

impl TrialCollector {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            total_millis: 0,
            total_elapsed: Duration::ZERO,
            trials: 0,
            histogram: Histogram::new_with_bounds(1, 3_600_000_000, 3)
                .expect("Failed to create histogram"),
        }
    }

    /// Record one trial
    pub fn record(&mut self, trial: &TrialMeasurement) {
        debug_assert_eq!(trial.strategy, self.strategy);
        self.total_millis += trial.elapsed_millis();
        self.total_elapsed += trial.elapsed;
        self.trials += 1;
        self.histogram
            .saturating_record(trial.elapsed.as_micros() as u64);
    }

    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Sum of per-trial milliseconds
    pub fn total_millis(&self) -> u64 {
        self.total_millis
    }

    pub fn finish(self, operations_per_trial: u64, batches: usize) -> AggregateResult {
        AggregateResult {
            strategy: self.strategy,
            total_millis: self.total_millis,
            total_elapsed: self.total_elapsed,
            trials: self.trials,
            operations_per_trial,
            batches,
            histogram: self.histogram,
        }
    }
}

/// Aggregate over all trials of one strategy
#[derive(Debug)]
pub struct AggregateResult {
    pub strategy: Strategy,
    /// Sum of per-trial elapsed milliseconds
    pub total_millis: u64,
    /// Untruncated sum of per-trial durations
    pub total_elapsed: Duration,
    pub trials: u64,
    pub operations_per_trial: u64,
    pub batches: usize,
    /// Trial durations in microseconds
    pub histogram: Histogram<u64>,
}

impl AggregateResult {
    pub fn mean_trial_ms(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.histogram.mean() / 1000.0
        }
    }

    pub fn percentile_ms(&self, p: f64) -> f64 {
        self.histogram.value_at_percentile(p) as f64 / 1000.0
    }

    pub fn min_trial_ms(&self) -> f64 {
        self.histogram.min() as f64 / 1000.0
    }

    pub fn max_trial_ms(&self) -> f64 {
        self.histogram.max() as f64 / 1000.0
    }

    /// Workload invocations per second over all trials
    pub fn throughput(&self) -> f64 {
        let secs = self.total_elapsed.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            (self.operations_per_trial * self.trials) as f64 / secs
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "strategy": self.strategy.as_str(),
            "trials": self.trials,
            "batches": self.batches,
            "operations_per_trial": self.operations_per_trial,
            "total_ms": self.total_millis,
            "throughput_ops": self.throughput(),
            "trial_ms": {
                "mean": self.mean_trial_ms(),
                "min": self.min_trial_ms(),
                "p50": self.percentile_ms(50.0),
                "p99": self.percentile_ms(99.0),
                "max": self.max_trial_ms()
            }
        })
    }

    pub fn csv_header() -> &'static str {
        "strategy,trials,batches,operations_per_trial,total_ms,mean_ms,min_ms,p50_ms,p99_ms,max_ms,throughput_ops"
    }

    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{:.3},{:.3},{:.3},{:.3},{:.3},{:.0}",
            self.strategy.as_str(),
            self.trials,
            self.batches,
            self.operations_per_trial,
            self.total_millis,
            self.mean_trial_ms(),
            self.min_trial_ms(),
            self.percentile_ms(50.0),
            self.percentile_ms(99.0),
            self.max_trial_ms(),
            self.throughput()
        )
    }
}
