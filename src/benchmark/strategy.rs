//! Execution strategy definitions

/// Supported execution strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// One loop over all operations on the calling thread
    Sequential,
    /// Every batch in turn on the calling thread
    SequentialBatched,
    /// One freshly spawned thread per batch, awaited with a countdown latch
    ThreadPerBatch,
    /// Batches submitted to a fixed-size worker pool
    Pooled,
}

impl Strategy {
    /// Reference run order
    pub const ALL: [Strategy; 4] = [
        Self::Sequential,
        Self::SequentialBatched,
        Self::ThreadPerBatch,
        Self::Pooled,
    ];

    /// Parse strategy from string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "sync" | "synchronous" | "sequential" => Some(Self::Sequential),
            "sync-batches" | "synchronous-batches" | "sequential-batched" | "batched" => {
                Some(Self::SequentialBatched)
            }
            "thread" | "thread-per-batch" | "threads" => Some(Self::ThreadPerBatch),
            "pool" | "executor-pool" | "pooled" => Some(Self::Pooled),
            _ => None,
        }
    }

    /// Get display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sequential => "Synchronous",
            Self::SequentialBatched => "Synchronous batches",
            Self::ThreadPerBatch => "Thread per batch",
            Self::Pooled => "Executor pool",
        }
    }

    /// Check if the strategy drops the partition remainder
    pub fn uses_partition(&self) -> bool {
        !matches!(self, Self::Sequential)
    }

    /// Check if the strategy dispatches work to other threads
    pub fn is_concurrent(&self) -> bool {
        matches!(self, Self::ThreadPerBatch | Self::Pooled)
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strategies() {
        assert_eq!(Strategy::parse("sync"), Some(Strategy::Sequential));
        assert_eq!(Strategy::parse("SEQUENTIAL"), Some(Strategy::Sequential));
        assert_eq!(Strategy::parse("batched"), Some(Strategy::SequentialBatched));
        assert_eq!(Strategy::parse(" thread "), Some(Strategy::ThreadPerBatch));
        assert_eq!(Strategy::parse("pool"), Some(Strategy::Pooled));
        assert_eq!(Strategy::parse("fibers"), None);
    }

    #[test]
    fn test_reference_order() {
        let names: Vec<_> = Strategy::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Synchronous",
                "Synchronous batches",
                "Thread per batch",
                "Executor pool"
            ]
        );
    }

    #[test]
    fn test_classification() {
        assert!(!Strategy::Sequential.uses_partition());
        assert!(Strategy::SequentialBatched.uses_partition());
        assert!(!Strategy::SequentialBatched.is_concurrent());
        assert!(Strategy::ThreadPerBatch.is_concurrent());
        assert!(Strategy::Pooled.is_concurrent());
    }
}
