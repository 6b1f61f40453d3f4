//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with write-time expiry.

use chrono::{DateTime, TimeDelta, Utc};

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Time of the last write of this entry
    pub written_at: DateTime<Utc>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry written at `now`.
    pub fn new(value: V, now: DateTime<Utc>) -> Self {
        Self {
            value,
            written_at: now,
        }
    }

    // == Age ==
    /// Time elapsed since the entry was written, never negative.
    pub fn age(&self, now: DateTime<Utc>) -> TimeDelta {
        (now - self.written_at).max(TimeDelta::zero())
    }

    // == Is Expired ==
    /// Checks if the entry has outlived `ttl`.
    ///
    /// Boundary condition: an entry whose age equals `ttl` exactly is still
    /// live; it expires once its age exceeds `ttl`.
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: TimeDelta) -> bool {
        self.age(now) > ttl
    }
}
