//! Consistency Engine
//!
//! Keeps the authoritative [`RecordTable`] and the bounded cache in step.
//!
//! Both stores live behind a single `tokio::sync::RwLock` and are treated as
//! one consistency domain: create, update, delete, sweep and the cache-refresh
//! branch of list hold the write half for their whole critical section; the
//! plain branch of list holds the read half. The cache is only ever touched
//! while the lock is held.
//!
//! The cache may lag the table (evicted or expired entries, failed mirror
//! writes) but every divergence is either repaired by the next list refresh
//! or reported by [`IncidentService::verify_consistency`].

mod guard;
mod maintenance;
mod metrics;
mod operations;
mod verify;

#[cfg(test)]
mod property_tests;

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

pub use guard::{
    interrupt_channel, read_interruptibly, write_interruptibly, InterruptSignal, Interrupted,
    Interrupter,
};
pub use maintenance::SweepReport;
pub use metrics::{EngineMetrics, EngineMetricsSnapshot};
pub use verify::ConsistencyReport;

use crate::cache::{CacheStats, IncidentCache, RecordCache};
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::models::Incident;
use crate::store::{IdAllocator, RecordTable};

// == Engine Settings ==
/// Construction-time knobs for the engine. Never changed afterwards.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// Capacity of the cache built by [`IncidentService::new`]
    pub cache_capacity: usize,
    /// Age since last write after which records leave both stores
    pub expiration: Duration,
    /// Minimum time between cache rebuilds on the list path
    pub refresh_interval: Duration,
    /// Cache write attempts an update makes before rolling back
    pub update_retry_limit: u32,
    /// Fraction of capacity a sweep evicts the cache down to
    pub eviction_target_ratio: f64,
    /// Fraction of capacity at which a sweep starts evicting
    pub eviction_trigger_ratio: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for EngineSettings {
    fn from(config: &Config) -> Self {
        Self {
            cache_capacity: config.cache_capacity,
            expiration: Duration::from_secs(config.expiration_secs),
            refresh_interval: Duration::from_secs(config.refresh_interval_secs),
            update_retry_limit: config.update_retry_limit,
            eviction_target_ratio: config.eviction_target_ratio,
            eviction_trigger_ratio: config.eviction_trigger_ratio,
        }
    }
}

// == Engine Stats ==
/// Sizes and counters reported by [`IncidentService::stats`].
#[derive(Debug, Clone, Serialize)]
pub struct EngineStats {
    pub table_entries: usize,
    /// Live cache entries, the count the refresh rule compares against
    pub cache_entries: usize,
    pub cache_capacity: usize,
    pub cache: CacheStats,
    pub metrics: EngineMetricsSnapshot,
}

/// The joint state guarded by the engine's lock.
#[derive(Debug)]
struct Stores<C> {
    table: RecordTable,
    cache: C,
    last_cache_refresh: DateTime<Utc>,
}

// == Incident Service ==
/// The consistency engine.
///
/// Generic over the cache so tests can substitute one that fails on demand.
#[derive(Debug)]
pub struct IncidentService<C = IncidentCache> {
    stores: RwLock<Stores<C>>,
    ids: IdAllocator,
    clock: Arc<dyn Clock>,
    settings: EngineSettings,
    metrics: EngineMetrics,
}

impl IncidentService<IncidentCache> {
    /// Builds an engine on wall-clock time.
    pub fn new(settings: EngineSettings) -> Self {
        Self::with_clock(settings, Arc::new(SystemClock))
    }

    /// Builds an engine whose table and cache both read time from `clock`.
    pub fn with_clock(settings: EngineSettings, clock: Arc<dyn Clock>) -> Self {
        let cache =
            IncidentCache::with_clock(settings.cache_capacity, settings.expiration, clock.clone());
        Self::with_cache(settings, cache, clock)
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(EngineSettings::from(config))
    }
}

impl<C: RecordCache> IncidentService<C> {
    /// Builds an engine around an existing cache.
    ///
    /// The cache's own capacity, not `settings.cache_capacity`, drives sweep
    /// eviction.
    pub fn with_cache(settings: EngineSettings, cache: C, clock: Arc<dyn Clock>) -> Self {
        let now = clock.now();
        Self {
            stores: RwLock::new(Stores {
                table: RecordTable::new(),
                cache,
                last_cache_refresh: now,
            }),
            ids: IdAllocator::new(),
            clock,
            settings,
            metrics: EngineMetrics::new(),
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn metrics(&self) -> EngineMetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Table size, cache statistics and engine counters.
    pub async fn stats(&self) -> EngineStats {
        let stores = self.stores.read().await;
        EngineStats {
            table_entries: stores.table.len(),
            cache_entries: stores.cache.len(),
            cache_capacity: stores.cache.capacity(),
            cache: stores.cache.stats(),
            metrics: self.metrics.snapshot(),
        }
    }

    /// Number of records in the authoritative table.
    pub async fn table_len(&self) -> usize {
        self.stores.read().await.table.len()
    }

    /// Number of live cache entries.
    pub async fn cache_len(&self) -> usize {
        self.stores.read().await.cache.len()
    }

    /// Every table row, ordered by id.
    pub async fn table_snapshot(&self) -> Vec<Incident> {
        self.stores.read().await.table.iter().cloned().collect()
    }

    /// Every live cache entry, ordered by id, read without touching recency.
    pub async fn cache_snapshot(&self) -> Vec<Incident> {
        self.stores.read().await.cache.snapshot()
    }
}
