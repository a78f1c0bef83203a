//! Result reporting and export
//!
//! Supports multiple output formats:
//! - Console (one `<strategy> exec time: <ms>` line per strategy)
//! - JSON
//! - CSV

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use super::collector::AggregateResult;
use crate::config::OutputFormat;
use crate::utils::Result;

/// Results reporter
pub struct MetricsReporter {
    format: OutputFormat,
}

impl MetricsReporter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Line printed once the partition is built
    pub fn batches_line(batches: usize) -> String {
        format!("Batches: {}", batches)
    }

    /// Headline result for one strategy
    pub fn exec_time_line(result: &AggregateResult) -> String {
        format!("{} exec time: {}", result.strategy, result.total_millis)
    }

    /// Print one strategy result as soon as it is available
    ///
    /// Only the console format streams; JSON and CSV are emitted whole by
    /// [`MetricsReporter::report_all`].
    pub fn report_strategy(&self, result: &AggregateResult, detailed: bool) {
        if self.format != OutputFormat::Console {
            return;
        }

        println!("{}", Self::exec_time_line(result));
        if detailed {
            println!(
                "  trials={} ops/trial={} mean={:.3}ms p50={:.3}ms p99={:.3}ms max={:.3}ms",
                result.trials,
                result.operations_per_trial,
                result.mean_trial_ms(),
                result.percentile_ms(50.0),
                result.percentile_ms(99.0),
                result.max_trial_ms()
            );
        }
    }

    /// Print all results in the structured formats
    pub fn report_all(&self, results: &[AggregateResult]) -> Result<()> {
        match self.format {
            OutputFormat::Console => {}
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&Self::to_json(results))?);
            }
            OutputFormat::Csv => {
                let stdout = io::stdout();
                Self::write_csv(&mut stdout.lock(), results)?;
            }
        }
        Ok(())
    }

    pub fn to_json(results: &[AggregateResult]) -> serde_json::Value {
        serde_json::json!({
            "strategies": results.iter().map(AggregateResult::to_json).collect::<Vec<_>>()
        })
    }

    /// Write all results to JSON file
    pub fn write_json_file(path: &Path, results: &[AggregateResult]) -> Result<()> {
        let mut file = File::create(path)?;
        writeln!(file, "{}", serde_json::to_string_pretty(&Self::to_json(results))?)?;
        Ok(())
    }

    /// Write all results to CSV file
    pub fn write_csv_file(path: &Path, results: &[AggregateResult]) -> Result<()> {
        let mut file = File::create(path)?;
        Self::write_csv(&mut file, results)?;
        Ok(())
    }

    fn write_csv<W: Write>(out: &mut W, results: &[AggregateResult]) -> io::Result<()> {
        writeln!(out, "{}", AggregateResult::csv_header())?;
        for result in results {
            writeln!(out, "{}", result.to_csv_row())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmark::Strategy;
    use crate::metrics::collector::{TrialCollector, TrialMeasurement};
    use std::time::Duration;

    fn result(strategy: Strategy, trials: &[u64]) -> AggregateResult {
        let mut collector = TrialCollector::new(strategy);
        for ms in trials {
            collector.record(&TrialMeasurement {
                strategy,
                elapsed: Duration::from_millis(*ms),
            });
        }
        collector.finish(250_000, 8)
    }

    #[test]
    fn test_exec_time_line() {
        let r = result(Strategy::ThreadPerBatch, &[4, 6, 5]);
        assert_eq!(MetricsReporter::exec_time_line(&r), "Thread per batch exec time: 15");
        assert_eq!(MetricsReporter::batches_line(8), "Batches: 8");
    }

    #[test]
    fn test_csv_output() {
        let results = vec![
            result(Strategy::Sequential, &[10, 10]),
            result(Strategy::Pooled, &[3]),
        ];
        let mut buf = Vec::new();
        MetricsReporter::write_csv(&mut buf, &results).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], AggregateResult::csv_header());
        assert!(lines[1].starts_with("Synchronous,2,8,250000,20,"));
        assert!(lines[2].starts_with("Executor pool,1,8,250000,3,"));
    }

    #[test]
    fn test_json_file_round_trip() {
        let results = vec![result(Strategy::SequentialBatched, &[1, 2, 3])];
        let path = std::env::temp_dir().join(format!(
            "pool-exec-bench-report-{}.json",
            std::process::id()
        ));

        MetricsReporter::write_json_file(&path, &results).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["strategies"][0]["strategy"], "Synchronous batches");
        assert_eq!(value["strategies"][0]["total_ms"], 6);
    }
}
