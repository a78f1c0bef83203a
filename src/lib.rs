//! pool-exec-bench library
//!
//! Micro-benchmark harness comparing sequential, batched, thread-per-batch
//! and pooled execution of a fixed amount of CPU-bound work.

pub mod benchmark;
pub mod config;
pub mod metrics;
pub mod utils;
pub mod workload;
