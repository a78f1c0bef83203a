//! Splitting the total operation count into equal batches

use std::ops::Deref;

use super::batch::Batch;
use crate::utils::{BenchmarkError, Result};

/// Ordered list of equal-sized batches
///
/// Built once per driver and shared read-only by every strategy and trial.
/// When `total_operations` is not divisible by the degree, the remainder is
/// dropped rather than redistributed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    batches: Vec<Batch>,
    total_operations: u64,
}

impl Partition {
    /// Create `degree` batches of `total_operations / degree` operations each
    pub fn new(total_operations: u64, degree: usize) -> Result<Self> {
        if degree == 0 {
            return Err(BenchmarkError::Config(
                "parallelism degree must be greater than zero".to_string(),
            ));
        }

        let per_batch = total_operations / degree as u64;
        let batches = vec![Batch::new(per_batch); degree];

        Ok(Self {
            batches,
            total_operations,
        })
    }

    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    /// Number of batches (the parallelism degree)
    pub fn degree(&self) -> usize {
        self.batches.len()
    }

    /// Operation count requested when the partition was built
    pub fn total_operations(&self) -> u64 {
        self.total_operations
    }

    /// Operations actually covered by the batches
    pub fn covered_operations(&self) -> u64 {
        self.batches.iter().map(Batch::operation_count).sum()
    }

    /// Operations lost to integer division
    pub fn remainder(&self) -> u64 {
        self.total_operations - self.covered_operations()
    }
}

impl Deref for Partition {
    type Target = [Batch];

    fn deref(&self) -> &Self::Target {
        &self.batches
    }
}
