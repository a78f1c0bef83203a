//! Trial metrics collection and reporting
//!
//! This module provides:
//! - Per-strategy accumulation of trial durations
//! - Console, JSON and CSV reporting

pub mod collector;
pub mod reporter;

pub use collector::{AggregateResult, TrialCollector, TrialMeasurement};
pub use reporter::MetricsReporter;
