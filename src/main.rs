//! pool-exec-bench - thread creation versus pooled reuse
//!
//! Runs the same CPU-bound workload under four execution strategies and
//! prints the total wall-clock milliseconds each one needed.

use std::sync::Arc;

use anyhow::Result;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use pool_exec_bench::benchmark::Orchestrator;
use pool_exec_bench::config::{BenchmarkConfig, CliArgs, OutputFormat};
use pool_exec_bench::metrics::MetricsReporter;
use pool_exec_bench::workload::SineWorkload;

fn setup_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

fn run() -> Result<()> {
    // Parse CLI arguments
    let args = CliArgs::parse_args();

    // Setup logging
    setup_logging(args.verbose, args.quiet);

    // Build configuration
    let config = BenchmarkConfig::from_cli(&args)?;
    info!("Configuration: {}", config.summary());

    let orchestrator = Orchestrator::new(config.clone(), Arc::new(SineWorkload))?;

    if config.output_format == OutputFormat::Console {
        println!("{}", MetricsReporter::batches_line(orchestrator.partition().degree()));
    }

    // Run all strategies
    let results = orchestrator.run_all()?;

    // Export to JSON if requested
    if let Some(ref output_path) = config.output_path {
        info!("Writing results to: {:?}", output_path);
        orchestrator.export_json(&results, output_path)?;
    }

    // Export to CSV if requested
    if let Some(ref csv_path) = config.csv_output {
        info!("Writing CSV to: {:?}", csv_path);
        orchestrator.export_csv(&results, csv_path)?;
    }

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        error!("Error: {:#}", e);
        std::process::exit(1);
    }
}
