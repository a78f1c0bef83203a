//! Error types for pool-exec-bench

use std::io;
use std::time::Duration;
use thiserror::Error;

/// Top-level harness error
///
/// Every variant is fatal to the run: the driver never retries a trial and
/// never reports a partial total for a strategy that failed.
#[derive(Error, Debug)]
pub enum BenchmarkError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Worker pool did not finish within {timeout:?}: {completed}/{expected} batches completed")]
    PoolTimeout {
        timeout: Duration,
        completed: usize,
        expected: usize,
    },

    #[error("Worker error: {0}")]
    Worker(String),

    #[error("Failed to spawn worker thread: {0}")]
    Spawn(#[source] io::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BenchmarkError>;
