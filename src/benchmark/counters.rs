//! Global atomic counters for thread synchronization
//!
//! These are the ONLY synchronization points between queue-pool workers and
//! the progress reporter. All other worker state is thread-local.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Counters shared between all workers of a queue-driven pool
///
/// Design principle: minimize contention by using relaxed ordering and
/// keeping counter operations simple (fetch_add).
pub struct PoolCounters {
    /// Total tasks pushed onto the queue (excluding stop messages)
    pub tasks_enqueued: AtomicU64,

    /// Total tasks processed (success or failure)
    pub tasks_completed: AtomicU64,

    /// Total task failures
    pub error_count: AtomicU64,

    /// Shutdown signal for the progress reporter
    pub shutdown: AtomicBool,
}

impl PoolCounters {
    /// Create new counters initialized to zero
    pub fn new() -> Self {
        Self {
            tasks_enqueued: AtomicU64::new(0),
            tasks_completed: AtomicU64::new(0),
            error_count: AtomicU64::new(0),
            shutdown: AtomicBool::new(false),
        }
    }

    /// Record tasks pushed onto the queue
    #[inline]
    pub fn record_enqueued(&self, count: u64) {
        self.tasks_enqueued.fetch_add(count, Ordering::Relaxed);
    }

    /// Record one processed task (the completion countdown)
    #[inline]
    pub fn record_completed(&self) {
        self.tasks_completed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a task failure
    #[inline]
    pub fn record_error(&self) {
        self.error_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Check if every enqueued task has been processed
    #[inline]
    pub fn is_drained(&self) -> bool {
        self.tasks_completed.load(Ordering::Relaxed) >= self.tasks_enqueued.load(Ordering::Relaxed)
    }

    /// Get current progress as (completed, enqueued)
    pub fn progress(&self) -> (u64, u64) {
        (
            self.tasks_completed.load(Ordering::Relaxed),
            self.tasks_enqueued.load(Ordering::Relaxed),
        )
    }

    /// Get error count
    pub fn errors(&self) -> u64 {
        self.error_count.load(Ordering::Relaxed)
    }

    /// Signal shutdown to the progress reporter
    pub fn signal_shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }

    /// Check if shutdown has been signaled
    #[inline]
    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::Relaxed)
    }
}

impl Default for PoolCounters {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_completion_countdown() {
        let counters = PoolCounters::new();
        counters.record_enqueued(3);

        assert!(!counters.is_drained());
        counters.record_completed();
        counters.record_completed();
        assert!(!counters.is_drained());
        counters.record_completed();
        assert!(counters.is_drained());

        assert_eq!(counters.progress(), (3, 3));
    }

    #[test]
    fn test_concurrent_completions() {
        let counters = Arc::new(PoolCounters::new());
        counters.record_enqueued(400);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let c = Arc::clone(&counters);
                thread::spawn(move || {
                    for _ in 0..100 {
                        c.record_completed();
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(counters.progress(), (400, 400));
        assert!(counters.is_drained());
    }

    #[test]
    fn test_errors_tracked_separately() {
        let counters = PoolCounters::new();
        counters.record_enqueued(2);

        counters.record_completed();
        counters.record_error();
        counters.record_completed();

        assert!(counters.is_drained());
        assert_eq!(counters.errors(), 1);
    }

    #[test]
    fn test_shutdown_signal() {
        let counters = PoolCounters::new();

        assert!(!counters.is_shutdown());
        counters.signal_shutdown();
        assert!(counters.is_shutdown());
    }
}
