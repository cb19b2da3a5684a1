//! Request and query counters
//!
//! Counters only, monotonic, reset on process start.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters shared by all handlers
///
/// Relaxed ordering throughout; readers only need eventually consistent values.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Queries that returned a result set (empty or not)
    queries_executed: AtomicU64,
    /// Queries that failed at the database layer
    queries_failed: AtomicU64,
    /// Queries that returned zero rows
    empty_results: AtomicU64,
    /// Total rows returned to clients
    rows_returned: AtomicU64,
    /// Requests rejected before reaching the catalog
    requests_rejected: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful query and its row count
    pub fn record_query(&self, rows: usize) {
        self.queries_executed.fetch_add(1, Ordering::Relaxed);
        if rows == 0 {
            self.empty_results.fetch_add(1, Ordering::Relaxed);
        } else {
            self.rows_returned.fetch_add(rows as u64, Ordering::Relaxed);
        }
    }

    /// Increment failed queries
    pub fn increment_queries_failed(&self) {
        self.queries_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment rejected requests
    pub fn increment_requests_rejected(&self) {
        self.requests_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all counters as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            queries_executed: self.queries_executed.load(Ordering::Relaxed),
            queries_failed: self.queries_failed.load(Ordering::Relaxed),
            empty_results: self.empty_results.load(Ordering::Relaxed),
            rows_returned: self.rows_returned.load(Ordering::Relaxed),
            requests_rejected: self.requests_rejected.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub queries_executed: u64,
    pub queries_failed: u64,
    pub empty_results: u64,
    pub rows_returned: u64,
    pub requests_rejected: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registry_has_zero_values() {
        let snapshot = MetricsRegistry::new().snapshot();
        assert_eq!(snapshot.queries_executed, 0);
        assert_eq!(snapshot.queries_failed, 0);
        assert_eq!(snapshot.empty_results, 0);
        assert_eq!(snapshot.rows_returned, 0);
        assert_eq!(snapshot.requests_rejected, 0);
    }

    #[test]
    fn test_record_query() {
        let registry = MetricsRegistry::new();
        registry.record_query(3);
        registry.record_query(0);

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.queries_executed, 2);
        assert_eq!(snapshot.empty_results, 1);
        assert_eq!(snapshot.rows_returned, 3);
    }

    #[test]
    fn test_failure_and_rejection_counters() {
        let registry = MetricsRegistry::new();
        registry.increment_queries_failed();
        registry.increment_requests_rejected();
        registry.increment_requests_rejected();

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.queries_failed, 1);
        assert_eq!(snapshot.requests_rejected, 2);
        assert_eq!(snapshot.queries_executed, 0);
    }

    #[test]
    fn test_snapshot_serializes() {
        let registry = MetricsRegistry::new();
        registry.record_query(5);

        let json = serde_json::to_value(registry.snapshot()).unwrap();
        assert_eq!(json["queries_executed"], 1);
        assert_eq!(json["rows_returned"], 5);
    }

    #[test]
    fn test_thread_safety() {
        use std::sync::Arc;
        use std::thread;

        let registry = Arc::new(MetricsRegistry::new());
        let mut handles = vec![];

        for _ in 0..10 {
            let reg = Arc::clone(&registry);
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    reg.record_query(1);
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.queries_executed, 1000);
        assert_eq!(snapshot.rows_returned, 1000);
    }
}
