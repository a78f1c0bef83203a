//! Configuration module

pub mod benchmark_config;
pub mod cli;

pub use benchmark_config::{
    BenchmarkConfig, DEFAULT_OPERATIONS, DEFAULT_PARALLELISM, DEFAULT_POOL_TIMEOUT,
    DEFAULT_REPETITIONS,
};
pub use cli::{CliArgs, OutputFormat, PoolMode};
