//! Countdown latch for awaiting a known number of workers
//!
//! Initialized to `count`; each finishing worker calls [`CountdownLatch::count_down`]
//! once and the waiter is released when the count reaches zero.

use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

pub struct CountdownLatch {
    remaining: Mutex<usize>,
    zero: Condvar,
}

impl CountdownLatch {
    pub fn new(count: usize) -> Self {
        Self {
            remaining: Mutex::new(count),
            zero: Condvar::new(),
        }
    }

    /// Decrement the count, waking waiters when it reaches zero
    ///
    /// Extra calls after zero are ignored.
    pub fn count_down(&self) {
        let mut remaining = self.remaining.lock();
        if *remaining == 0 {
            return;
        }
        *remaining -= 1;
        if *remaining == 0 {
            self.zero.notify_all();
        }
    }

    /// Current count
    pub fn count(&self) -> usize {
        *self.remaining.lock()
    }

    /// Block until the count reaches zero
    pub fn wait(&self) {
        let mut remaining = self.remaining.lock();
        while *remaining > 0 {
            self.zero.wait(&mut remaining);
        }
    }

    /// Block until the count reaches zero or `timeout` elapses
    ///
    /// Returns `true` if the count reached zero.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut remaining = self.remaining.lock();
        while *remaining > 0 {
            if self.zero.wait_until(&mut remaining, deadline).timed_out() {
                return *remaining == 0;
            }
        }
        true
    }

    /// Guard that counts down when dropped, including during unwinding
    pub fn guard(&self) -> CountdownGuard<'_> {
        CountdownGuard { latch: self }
    }
}

pub struct CountdownGuard<'a> {
    latch: &'a CountdownLatch,
}

impl Drop for CountdownGuard<'_> {
    fn drop(&mut self) {
        self.latch.count_down();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_zero_count_does_not_block() {
        let latch = CountdownLatch::new(0);
        latch.wait();
        assert!(latch.wait_timeout(Duration::from_millis(1)));
    }

    #[test]
    fn test_waiter_released_after_all_signals() {
        let n = 8;
        let latch = Arc::new(CountdownLatch::new(n));
        let finished = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..n)
            .map(|i| {
                let latch = Arc::clone(&latch);
                let finished = Arc::clone(&finished);
                thread::spawn(move || {
                    thread::sleep(Duration::from_millis(2 * i as u64));
                    finished.fetch_add(1, Ordering::SeqCst);
                    latch.count_down();
                })
            })
            .collect();

        latch.wait();
        assert_eq!(finished.load(Ordering::SeqCst), n);
        assert_eq!(latch.count(), 0);

        for h in handles {
            h.join().unwrap();
        }
    }

    #[test]
    fn test_not_released_before_last_signal() {
        let latch = CountdownLatch::new(3);
        latch.count_down();
        latch.count_down();
        assert!(!latch.wait_timeout(Duration::from_millis(20)));
        assert_eq!(latch.count(), 1);

        latch.count_down();
        assert!(latch.wait_timeout(Duration::from_millis(20)));
    }

    #[test]
    fn test_extra_signals_ignored() {
        let latch = CountdownLatch::new(1);
        latch.count_down();
        latch.count_down();
        assert_eq!(latch.count(), 0);
    }

    #[test]
    fn test_guard_counts_down_on_panic() {
        let latch = Arc::new(CountdownLatch::new(1));
        let worker_latch = Arc::clone(&latch);

        let result = thread::spawn(move || {
            let _guard = worker_latch.guard();
            panic!("boom");
        })
        .join();

        assert!(result.is_err());
        assert!(latch.wait_timeout(Duration::from_secs(1)));
    }
}
