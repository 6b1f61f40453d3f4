//! Cache Statistics Module
//!
//! Counts entries the cache dropped on its own: capacity evictions on `put`
//! and TTL expirations. Removals requested by the caller are not counted.

use serde::Serialize;

// == Cache Stats ==
/// Entries removed by the cache's own policies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Entries displaced to make room for a new key
    pub evictions: u64,
    /// Entries dropped because their time since last write exceeded the TTL
    pub expirations: u64,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_start_at_zero() {
        assert_eq!(CacheStats::new(), CacheStats { evictions: 0, expirations: 0 });
    }

    #[test]
    fn test_evictions_and_expirations_accumulate() {
        let mut stats = CacheStats::new();
        stats.record_eviction();
        stats.record_eviction();
        stats.record_expirations(3);
        stats.record_expirations(0);

        assert_eq!(stats.evictions, 2);
        assert_eq!(stats.expirations, 3);
    }
}
