//! Strategy runners
//!
//! Each runner executes the full workload once and returns when all of it is
//! done. Timing is left to the caller.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, warn};

use super::latch::CountdownLatch;
use super::pool::WorkerPool;
use super::strategy::Strategy;
use crate::config::PoolMode;
use crate::utils::{BenchmarkError, Result};
use crate::workload::{run_operations, Partition, Workload};

/// Runs one trial of any strategy against a fixed workload and partition
pub struct Executor {
    workload: Arc<dyn Workload>,
    partition: Arc<Partition>,
    total_operations: u64,
    pool_timeout: Duration,
    /// Pool reused across trials (`PoolMode::Shared` only)
    shared_pool: Option<WorkerPool>,
}

impl Executor {
    pub fn new(
        workload: Arc<dyn Workload>,
        partition: Arc<Partition>,
        pool_timeout: Duration,
        pool_mode: PoolMode,
    ) -> Result<Self> {
        let shared_pool = match pool_mode {
            PoolMode::Fresh => None,
            PoolMode::Shared => Some(WorkerPool::new(partition.degree())?),
        };

        Ok(Self {
            workload,
            total_operations: partition.total_operations(),
            partition,
            pool_timeout,
            shared_pool,
        })
    }

    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// Number of workload invocations one trial of `strategy` performs
    pub fn operations_per_trial(&self, strategy: Strategy) -> u64 {
        if strategy.uses_partition() {
            self.partition.covered_operations()
        } else {
            self.total_operations
        }
    }

    /// Execute one complete trial of `strategy`
    pub fn run(&self, strategy: Strategy) -> Result<()> {
        match strategy {
            Strategy::Sequential => {
                self.run_sequential();
                Ok(())
            }
            Strategy::SequentialBatched => {
                self.run_sequential_batched();
                Ok(())
            }
            Strategy::ThreadPerBatch => self.run_thread_per_batch(),
            Strategy::Pooled => self.run_pooled(),
        }
    }

    fn run_sequential(&self) {
        run_operations(&*self.workload, self.total_operations);
    }

    fn run_sequential_batched(&self) {
        for batch in self.partition.iter() {
            batch.run(&*self.workload);
        }
    }

    /// Spawn one thread per batch and block on a countdown latch
    fn run_thread_per_batch(&self) -> Result<()> {
        let degree = self.partition.degree();
        let latch = Arc::new(CountdownLatch::new(degree));
        let mut handles: Vec<JoinHandle<()>> = Vec::with_capacity(degree);

        for (batch_id, batch) in self.partition.iter().copied().enumerate() {
            let latch = Arc::clone(&latch);
            let workload = Arc::clone(&self.workload);

            let handle = thread::Builder::new()
                .name(format!("batch-{}", batch_id))
                .spawn(move || {
                    let _done = latch.guard();
                    batch.run(&*workload);
                })
                .map_err(BenchmarkError::Spawn)?;

            handles.push(handle);
        }

        latch.wait();

        let failed = handles
            .into_iter()
            .map(JoinHandle::join)
            .filter(|r| r.is_err())
            .count();
        if failed > 0 {
            warn!("{} of {} batch threads panicked", failed, degree);
            return Err(BenchmarkError::Worker(format!(
                "{} of {} batch threads panicked",
                failed, degree
            )));
        }

        Ok(())
    }

    /// Submit batches to a worker pool and await completion with a timeout
    fn run_pooled(&self) -> Result<()> {
        match &self.shared_pool {
            Some(pool) => pool
                .submit(&self.partition, &self.workload)
                .wait(self.pool_timeout),
            None => {
                let pool = WorkerPool::new(self.partition.degree())?;
                let pending = pool.submit(&self.partition, &self.workload);
                pool.shutdown();
                debug!("Awaiting {} pooled batches", pending.expected());
                pending.wait(self.pool_timeout)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    fn counting_executor(
        total: u64,
        degree: usize,
        pool_mode: PoolMode,
    ) -> (Arc<AtomicU64>, Executor) {
        let calls = Arc::new(AtomicU64::new(0));
        let c = Arc::clone(&calls);
        let workload: Arc<dyn Workload> = Arc::new(move |i: u64| {
            c.fetch_add(1, Ordering::Relaxed);
            i as f64
        });
        let partition = Arc::new(Partition::new(total, degree).unwrap());
        let executor =
            Executor::new(workload, partition, Duration::from_secs(10), pool_mode).unwrap();
        (calls, executor)
    }

    fn invocations(executor: &Executor, calls: &AtomicU64, strategy: Strategy) -> u64 {
        calls.store(0, Ordering::SeqCst);
        executor.run(strategy).unwrap();
        calls.load(Ordering::SeqCst)
    }

    #[test]
    fn test_even_split_all_strategies() {
        let (calls, executor) = counting_executor(24, 4, PoolMode::Fresh);

        for strategy in Strategy::ALL {
            assert_eq!(invocations(&executor, &calls, strategy), 24, "{strategy}");
            assert_eq!(executor.operations_per_trial(strategy), 24);
        }
    }

    #[test]
    fn test_remainder_only_affects_batched_strategies() {
        let (calls, executor) = counting_executor(25, 4, PoolMode::Fresh);

        assert_eq!(invocations(&executor, &calls, Strategy::Sequential), 25);
        assert_eq!(invocations(&executor, &calls, Strategy::SequentialBatched), 24);
        assert_eq!(invocations(&executor, &calls, Strategy::ThreadPerBatch), 24);
        assert_eq!(invocations(&executor, &calls, Strategy::Pooled), 24);
        assert_eq!(executor.operations_per_trial(Strategy::Sequential), 25);
        assert_eq!(executor.operations_per_trial(Strategy::Pooled), 24);
    }

    #[test]
    fn test_sequential_is_repeatable() {
        let (calls, executor) = counting_executor(1000, 8, PoolMode::Fresh);

        let first = invocations(&executor, &calls, Strategy::Sequential);
        let second = invocations(&executor, &calls, Strategy::Sequential);
        assert_eq!(first, 1000);
        assert_eq!(first, second);
    }

    #[test]
    fn test_shared_pool_mode() {
        let (calls, executor) = counting_executor(10_000, 4, PoolMode::Shared);

        for _ in 0..5 {
            assert_eq!(invocations(&executor, &calls, Strategy::Pooled), 10_000);
        }
    }

    #[test]
    fn test_thread_per_batch_panic_is_fatal() {
        let workload: Arc<dyn Workload> = Arc::new(|i: u64| {
            if i == 2 {
                panic!("workload failure");
            }
            0.0
        });
        let partition = Arc::new(Partition::new(40, 4).unwrap());
        let executor =
            Executor::new(workload, partition, Duration::from_secs(10), PoolMode::Fresh).unwrap();

        let err = executor.run(Strategy::ThreadPerBatch).unwrap_err();
        assert!(matches!(err, BenchmarkError::Worker(_)));
    }

    #[test]
    fn test_pooled_timeout() {
        let workload: Arc<dyn Workload> = Arc::new(|_: u64| {
            thread::sleep(Duration::from_millis(100));
            0.0
        });
        let partition = Arc::new(Partition::new(40, 2).unwrap());
        let executor = Executor::new(
            workload,
            partition,
            Duration::from_millis(20),
            PoolMode::Fresh,
        )
        .unwrap();

        let err = executor.run(Strategy::Pooled).unwrap_err();
        assert!(matches!(err, BenchmarkError::PoolTimeout { .. }));
    }
}
