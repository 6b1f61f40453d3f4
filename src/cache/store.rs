//! Cache Store Module
//!
//! Bounded cache combining HashMap storage with LRU tracking and
//! expire-after-write TTL.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use chrono::TimeDelta;

use crate::cache::{CacheEntry, CacheStats, LruTracker};
use crate::clock::{to_time_delta, Clock, SystemClock};
use crate::error::CacheError;

// == Cache Store ==
/// Bounded cache with LRU eviction and a fixed time-to-live since last write.
///
/// Expired entries are never returned. They are dropped lazily on access,
/// before any capacity eviction, and by [`CacheStore::purge_expired`].
#[derive(Debug)]
pub struct CacheStore<K, V> {
    /// Key-value storage
    entries: HashMap<K, CacheEntry<V>>,
    /// LRU access tracker
    lru: LruTracker<K>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// Lifetime of an entry after its last write
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
}

impl<K, V> CacheStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates a new CacheStore with specified capacity and TTL on wall time.
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        Self::with_clock(max_entries, ttl, Arc::new(SystemClock))
    }

    /// Creates a new CacheStore reading time from `clock`.
    pub fn with_clock(max_entries: usize, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            max_entries,
            ttl: to_time_delta(ttl),
            clock,
        }
    }

    // == Put ==
    /// Stores a value, resetting its write time.
    ///
    /// If the key is new and the cache is at capacity, expired entries are
    /// dropped first, then the least recently used entry is evicted. Fails
    /// with [`CacheError::Full`] only when nothing can be evicted, in which
    /// case the cache is left untouched.
    pub fn put(&mut self, key: K, value: V) -> Result<(), CacheError> {
        let is_overwrite = self.entries.contains_key(&key);

        if !is_overwrite && self.entries.len() >= self.max_entries {
            self.purge_expired();
        }

        if !is_overwrite && self.entries.len() >= self.max_entries {
            match self.lru.evict_oldest() {
                Some(evicted_key) => {
                    self.entries.remove(&evicted_key);
                    self.stats.record_eviction();
                }
                None => {
                    return Err(CacheError::Full(format!(
                        "capacity {} reached and nothing to evict",
                        self.max_entries
                    )));
                }
            }
        }

        let entry = CacheEntry::new(value, self.clock.now());
        self.entries.insert(key.clone(), entry);
        self.lru.touch(&key);

        Ok(())
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns the value if found and not expired, marking it recently used.
    /// An expired entry is removed and counted as an expiration.
    pub fn get(&mut self, key: &K) -> Option<V> {
        let now = self.clock.now();
        let expired = self.entries.get(key)?.is_expired(now, self.ttl);

        if expired {
            self.remove_entry(key);
            self.stats.record_expirations(1);
            return None;
        }

        self.lru.touch(key);
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Peek ==
    /// Reads a live value without touching LRU order or statistics.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let now = self.clock.now();
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired(now, self.ttl))
            .map(|entry| &entry.value)
    }

    // == Invalidate ==
    /// Removes an entry by key, returning its value if it was present.
    pub fn invalidate(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|entry| entry.value)
    }

    // == Invalidate All ==
    /// Removes every listed key. Returns how many were present.
    pub fn invalidate_all<'a, I>(&mut self, keys: I) -> usize
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        keys.into_iter()
            .filter(|key| self.remove_entry(key).is_some())
            .count()
    }

    // == Snapshot ==
    /// Clones every live entry.
    pub fn snapshot(&self) -> Vec<(K, V)> {
        let now = self.clock.now();
        self.entries
            .iter()
            .filter(|(_, entry)| !entry.is_expired(now, self.ttl))
            .map(|(key, entry)| (key.clone(), entry.value.clone()))
            .collect()
    }

    // == Live Keys ==
    /// Keys of every live entry.
    pub fn live_keys(&self) -> Vec<K> {
        let now = self.clock.now();
        self.entries
            .iter()
            .filter(|(_, entry)| !entry.is_expired(now, self.ttl))
            .map(|(key, _)| key.clone())
            .collect()
    }

    // == Live Length ==
    /// Number of entries that have not yet expired.
    pub fn live_len(&self) -> usize {
        let now = self.clock.now();
        self.entries
            .values()
            .filter(|entry| !entry.is_expired(now, self.ttl))
            .count()
    }

    // == Least Recently Used ==
    /// Up to `count` keys, least recently used first.
    pub fn least_recently_used(&self, count: usize) -> Vec<K> {
        self.lru.oldest().take(count).cloned().collect()
    }

    // == Purge Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now();
        let expired_keys: Vec<K> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now, self.ttl))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.remove_entry(key);
        }

        self.stats.record_expirations(expired_keys.len());
        expired_keys.len()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    // == Capacity ==
    pub fn capacity(&self) -> usize {
        self.max_entries
    }

    // == Length ==
    /// Returns the number of stored entries, including expired ones not yet dropped.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn remove_entry(&mut self, key: &K) -> Option<CacheEntry<V>> {
        let removed = self.entries.remove(key);
        if removed.is_some() {
            self.lru.remove(key);
        }
        removed
    }
}
