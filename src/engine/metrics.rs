//! Engine counters
//!
//! Failures the engine absorbs instead of returning are counted here so they
//! stay visible outside the logs.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Lock-free counters for absorbed failures and maintenance work.
#[derive(Debug, Default)]
pub struct EngineMetrics {
    cache_write_failures: AtomicU64,
    rollbacks: AtomicU64,
    invalidation_failures: AtomicU64,
    inconsistencies_detected: AtomicU64,
    cancelled_reads: AtomicU64,
    cache_refreshes: AtomicU64,
    sweeps: AtomicU64,
    records_expired: AtomicU64,
    entries_evicted: AtomicU64,
}

/// Point-in-time copy of [`EngineMetrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EngineMetricsSnapshot {
    pub cache_write_failures: u64,
    pub rollbacks: u64,
    pub invalidation_failures: u64,
    pub inconsistencies_detected: u64,
    pub cancelled_reads: u64,
    pub cache_refreshes: u64,
    pub sweeps: u64,
    pub records_expired: u64,
    pub entries_evicted: u64,
}

impl EngineMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_cache_write_failure(&self) {
        self.cache_write_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rollback(&self) {
        self.rollbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_invalidation_failure(&self) {
        self.invalidation_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_inconsistencies(&self, count: usize) {
        self.inconsistencies_detected
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_cancelled_read(&self) {
        self.cancelled_reads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_refresh(&self) {
        self.cache_refreshes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_sweep(&self, expired: usize, evicted: usize) {
        self.sweeps.fetch_add(1, Ordering::Relaxed);
        self.records_expired
            .fetch_add(expired as u64, Ordering::Relaxed);
        self.entries_evicted
            .fetch_add(evicted as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> EngineMetricsSnapshot {
        EngineMetricsSnapshot {
            cache_write_failures: self.cache_write_failures.load(Ordering::Relaxed),
            rollbacks: self.rollbacks.load(Ordering::Relaxed),
            invalidation_failures: self.invalidation_failures.load(Ordering::Relaxed),
            inconsistencies_detected: self.inconsistencies_detected.load(Ordering::Relaxed),
            cancelled_reads: self.cancelled_reads.load(Ordering::Relaxed),
            cache_refreshes: self.cache_refreshes.load(Ordering::Relaxed),
            sweeps: self.sweeps.load(Ordering::Relaxed),
            records_expired: self.records_expired.load(Ordering::Relaxed),
            entries_evicted: self.entries_evicted.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_reflects_records() {
        let metrics = EngineMetrics::new();
        metrics.record_cache_write_failure();
        metrics.record_cache_write_failure();
        metrics.record_rollback();
        metrics.record_inconsistencies(4);
        metrics.record_sweep(3, 10);
        metrics.record_sweep(0, 0);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.cache_write_failures, 2);
        assert_eq!(snapshot.rollbacks, 1);
        assert_eq!(snapshot.inconsistencies_detected, 4);
        assert_eq!(snapshot.sweeps, 2);
        assert_eq!(snapshot.records_expired, 3);
        assert_eq!(snapshot.entries_evicted, 10);
        assert_eq!(snapshot.cancelled_reads, 0);
    }
}
