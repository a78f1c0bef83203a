//! Benchmark orchestration and strategy runners
//!
//! This module provides the execution side of the harness:
//! - Strategy: the four interchangeable execution strategies
//! - CountdownLatch: completion barrier for thread-per-batch
//! - WorkerPool: fixed-size pool with bounded completion wait
//! - Executor: runs one trial of a strategy
//! - Orchestrator: times trials and aggregates results

pub mod executor;
pub mod latch;
pub mod orchestrator;
pub mod pool;
pub mod strategy;

pub use executor::Executor;
pub use latch::{CountdownGuard, CountdownLatch};
pub use orchestrator::{format_count, Orchestrator};
pub use pool::{PendingBatches, WorkerPool};
pub use strategy::Strategy;
