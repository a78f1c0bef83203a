//! Workload definition and batching

pub mod batch;
pub mod function;
pub mod partition;

pub use batch::{run_operations, Batch};
pub use function::{SineWorkload, Workload};
pub use partition::Partition;
