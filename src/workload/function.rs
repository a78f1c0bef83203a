//! Unit of CPU-bound work

use std::f64::consts::PI;

/// A pure function from an operation index to a number
///
/// Implementations must be free of side effects and safe to call from many
/// threads at once without synchronization. Results are never inspected by
/// the harness; only the time spent producing them is measured.
pub trait Workload: Send + Sync {
    fn apply(&self, index: u64) -> f64;
}

impl<F> Workload for F
where
    F: Fn(u64) -> f64 + Send + Sync,
{
    #[inline]
    fn apply(&self, index: u64) -> f64 {
        self(index)
    }
}

/// Default workload: `sin(i * 100000 / PI)`
#[derive(Debug, Clone, Copy, Default)]
pub struct SineWorkload;

impl Workload for SineWorkload {
    #[inline]
    fn apply(&self, index: u64) -> f64 {
        (index as f64 * 100_000.0 / PI).sin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sine_workload_is_deterministic() {
        let w = SineWorkload;
        assert_eq!(w.apply(0), 0.0);
        assert_eq!(w.apply(12345), w.apply(12345));
        assert!((-1.0..=1.0).contains(&w.apply(987_654)));
    }

    #[test]
    fn test_closure_workload() {
        let double = |i: u64| i as f64 * 2.0;
        assert_eq!(double.apply(21), 42.0);
    }
}
