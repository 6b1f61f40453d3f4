//! LRU Tracker Module
//!
//! Implements Least Recently Used tracking for cache eviction.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

// == LRU Tracker ==
/// Tracks access order for LRU eviction strategy.
///
/// Every touch stamps the key with a fresh tick. `order` maps ticks to keys,
/// so its first entry is the least recently used key and its last entry the
/// most recently used one. `ticks` is the reverse index.
#[derive(Debug)]
pub struct LruTracker<K> {
    order: BTreeMap<u64, K>,
    ticks: HashMap<K, u64>,
    next_tick: u64,
}

impl<K: Eq + Hash + Clone> LruTracker<K> {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self {
            order: BTreeMap::new(),
            ticks: HashMap::new(),
            next_tick: 0,
        }
    }

    // == Touch ==
    /// Marks a key as most recently used.
    pub fn touch(&mut self, key: &K) {
        let tick = self.next_tick;
        self.next_tick += 1;

        if let Some(previous) = self.ticks.insert(key.clone(), tick) {
            self.order.remove(&previous);
        }
        self.order.insert(tick, key.clone());
    }

    // == Remove ==
    /// Removes a key from the tracker.
    pub fn remove(&mut self, key: &K) {
        if let Some(tick) = self.ticks.remove(key) {
            self.order.remove(&tick);
        }
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<K> {
        let (_, key) = self.order.pop_first()?;
        self.ticks.remove(&key);
        Some(key)
    }

    // == Oldest ==
    /// Iterates keys from least to most recently used.
    pub fn oldest(&self) -> impl Iterator<Item = &K> {
        self.order.values()
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<K: Eq + Hash + Clone> Default for LruTracker<K> {
    fn default() -> Self {
        Self::new()
    }
}
