//! Request counters for the HTTP fetcher.
//!
//! Counts are kept locally and also forwarded to the `metrics` facade, which
//! is a no-op unless the embedding application installs a recorder.

use metrics::counter;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct RequestMetrics {
    requests: AtomicU64,
    failures: AtomicU64,
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RequestSnapshot {
    pub requests: u64,
    pub failures: u64,
}

impl RequestMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an issued GET request
    pub fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        counter!("terracotta_requests_total").increment(1);
    }

    /// Record a failed GET request
    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
        counter!("terracotta_request_failures_total").increment(1);
    }

    pub fn snapshot(&self) -> RequestSnapshot {
        RequestSnapshot {
            requests: self.requests.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_accumulate() {
        let metrics = RequestMetrics::new();
        metrics.record_request();
        metrics.record_request();
        metrics.record_failure();
        assert_eq!(
            metrics.snapshot(),
            RequestSnapshot {
                requests: 2,
                failures: 1
            }
        );
    }
}
