//! A contiguous slice of the total work

use std::hint::black_box;

use super::function::Workload;

/// Fixed number of workload invocations, run sequentially by whichever
/// thread calls [`Batch::run`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Batch {
    operation_count: u64,
}

impl Batch {
    pub fn new(operation_count: u64) -> Self {
        Self { operation_count }
    }

    pub fn operation_count(&self) -> u64 {
        self.operation_count
    }

    /// Invoke `workload` for indices `0..operation_count`, discarding results
    #[inline]
    pub fn run<W: Workload + ?Sized>(&self, workload: &W) {
        run_operations(workload, self.operation_count);
    }
}

/// Tight loop shared by batches and the unbatched sequential strategy
#[inline]
pub fn run_operations<W: Workload + ?Sized>(workload: &W, count: u64) {
    for i in 0..count {
        black_box(workload.apply(black_box(i)));
    }
}
