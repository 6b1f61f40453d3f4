//! Cache Module
//!
//! Provides the bounded, write-expiring cache that answers bulk reads.
//!
//! [`CacheStore`] is the generic store. [`RecordCache`] is the narrower,
//! incident-keyed surface the engine programs against; its put and
//! invalidate calls may fail transiently, and callers decide what a failure
//! means for them.

mod entry;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::CacheStore;

use crate::error::CacheError;
use crate::models::Incident;

/// The cache the engine uses by default.
pub type IncidentCache = CacheStore<u64, Incident>;

// == Record Cache ==
/// Cache operations the consistency engine relies on.
///
/// Every view (`peek`, `snapshot`, `keys`, `len`) covers live entries only.
pub trait RecordCache: Send + Sync {
    /// Reads an entry, updating recency and statistics.
    fn get(&mut self, id: u64) -> Option<Incident>;

    /// Reads an entry without side effects.
    fn peek(&self, id: u64) -> Option<&Incident>;

    /// Writes an entry, resetting its write time. May evict another entry.
    fn put(&mut self, id: u64, incident: Incident) -> Result<(), CacheError>;

    fn invalidate(&mut self, id: u64) -> Result<(), CacheError>;

    fn invalidate_all(&mut self, ids: &[u64]) -> Result<(), CacheError>;

    /// Every live entry, ordered by id.
    fn snapshot(&self) -> Vec<Incident>;

    /// Every live key, ascending.
    fn keys(&self) -> Vec<u64>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn capacity(&self) -> usize;

    /// Up to `count` keys the cache would give up first.
    fn eviction_candidates(&self, count: usize) -> Vec<u64>;

    /// Drops expired entries, returning how many were removed.
    fn purge_expired(&mut self) -> usize;

    fn stats(&self) -> CacheStats;
}

impl RecordCache for IncidentCache {
    fn get(&mut self, id: u64) -> Option<Incident> {
        CacheStore::get(self, &id)
    }

    fn peek(&self, id: u64) -> Option<&Incident> {
        CacheStore::peek(self, &id)
    }

    fn put(&mut self, id: u64, incident: Incident) -> Result<(), CacheError> {
        CacheStore::put(self, id, incident)
    }

    fn invalidate(&mut self, id: u64) -> Result<(), CacheError> {
        CacheStore::invalidate(self, &id);
        Ok(())
    }

    fn invalidate_all(&mut self, ids: &[u64]) -> Result<(), CacheError> {
        CacheStore::invalidate_all(self, ids);
        Ok(())
    }

    fn snapshot(&self) -> Vec<Incident> {
        let mut incidents: Vec<Incident> = CacheStore::snapshot(self)
            .into_iter()
            .map(|(_, incident)| incident)
            .collect();
        incidents.sort_by_key(|incident| incident.id);
        incidents
    }

    fn keys(&self) -> Vec<u64> {
        let mut keys = self.live_keys();
        keys.sort_unstable();
        keys
    }

    fn len(&self) -> usize {
        self.live_len()
    }

    fn capacity(&self) -> usize {
        CacheStore::capacity(self)
    }

    fn eviction_candidates(&self, count: usize) -> Vec<u64> {
        self.least_recently_used(count)
    }

    fn purge_expired(&mut self) -> usize {
        CacheStore::purge_expired(self)
    }

    fn stats(&self) -> CacheStats {
        CacheStore::stats(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IncidentDraft;
    use chrono::Utc;
    use std::time::Duration;

    fn incident(id: u64) -> Incident {
        Incident::new(id, IncidentDraft::new(format!("Incident {}", id), "d"), Utc::now())
    }

    #[test]
    fn test_record_cache_snapshot_sorted_by_id() {
        let mut cache = IncidentCache::new(10, Duration::from_secs(60));
        for id in [5u64, 1, 3] {
            RecordCache::put(&mut cache, id, incident(id)).unwrap();
        }

        let ids: Vec<u64> = RecordCache::snapshot(&cache).iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 3, 5]);
        assert_eq!(RecordCache::keys(&cache), vec![1, 3, 5]);
    }

    #[test]
    fn test_record_cache_invalidate_missing_is_ok() {
        let mut cache = IncidentCache::new(10, Duration::from_secs(60));
        assert!(RecordCache::invalidate(&mut cache, 9).is_ok());
        assert!(RecordCache::invalidate_all(&mut cache, &[1, 2]).is_ok());
        assert!(RecordCache::is_empty(&cache));
    }
}
