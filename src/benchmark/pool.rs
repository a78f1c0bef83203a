//! Fixed-size worker pool for the pooled strategy
//!
//! Thin wrapper over `threadpool::ThreadPool` that tracks completion of a
//! set of submitted batches through a channel, so the caller can await them
//! with a bounded timeout.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError};
use threadpool::ThreadPool;
use tracing::debug;

use crate::utils::{BenchmarkError, Result};
use crate::workload::{Partition, Workload};

pub struct WorkerPool {
    pool: ThreadPool,
}

impl WorkerPool {
    /// Create a pool with exactly `size` workers
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(BenchmarkError::Config(
                "worker pool size must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            pool: ThreadPool::with_name("pool-worker".to_string(), size),
        })
    }

    pub fn size(&self) -> usize {
        self.pool.max_count()
    }

    /// Submit every batch of `partition` as an independent job
    pub fn submit(&self, partition: &Partition, workload: &Arc<dyn Workload>) -> PendingBatches {
        let expected = partition.degree();
        let (tx, rx) = crossbeam_channel::bounded(expected);

        for batch in partition.iter().copied() {
            let tx = tx.clone();
            let workload = Arc::clone(workload);
            self.pool.execute(move || {
                batch.run(&*workload);
                // Receiver may be gone after a timeout
                let _ = tx.send(());
            });
        }

        PendingBatches { rx, expected }
    }

    /// Stop accepting work; queued and running jobs still finish
    pub fn shutdown(self) {
        debug!(
            queued = self.pool.queued_count(),
            active = self.pool.active_count(),
            "Shutting down worker pool"
        );
        drop(self.pool);
    }
}

/// Completion handle for one round of submitted batches
pub struct PendingBatches {
    rx: Receiver<()>,
    expected: usize,
}

impl PendingBatches {
    pub fn expected(&self) -> usize {
        self.expected
    }

    /// Block until every batch has completed or `timeout` elapses
    ///
    /// A timeout or a job that died without completing is fatal.
    pub fn wait(self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        let mut completed = 0;

        while completed < self.expected {
            match self.rx.recv_deadline(deadline) {
                Ok(()) => completed += 1,
                Err(RecvTimeoutError::Timeout) => {
                    return Err(BenchmarkError::PoolTimeout {
                        timeout,
                        completed,
                        expected: self.expected,
                    });
                }
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(BenchmarkError::Worker(format!(
                        "{} of {} pool jobs terminated without completing",
                        self.expected - completed,
                        self.expected
                    )));
                }
            }
        }

        Ok(())
    }
}
