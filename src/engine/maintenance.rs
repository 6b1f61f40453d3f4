//! Periodic maintenance
//!
//! One sweep pass expires stale records from both stores and relieves cache
//! capacity pressure. The engine does not schedule sweeps itself; see
//! `tasks::spawn_sweep_task` for the default trigger.

use serde::Serialize;
use tracing::{debug, info, warn};

use super::{IncidentService, Stores};
use crate::cache::RecordCache;
use crate::clock::to_time_delta;

// == Sweep Report ==
/// What one sweep pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    /// Records removed from the table (and the cache) for being stale
    pub expired: usize,
    /// Cache entries dropped by the cache's own TTL during the pass
    pub cache_purged: usize,
    /// Cache entries invalidated to relieve capacity pressure
    pub evicted: usize,
    /// Divergent keys found by the verification run after the pass
    pub inconsistencies: usize,
}

impl<C: RecordCache> IncidentService<C> {
    // == Sweep ==
    /// Runs one maintenance pass.
    ///
    /// Under the write lock: every record whose last update is older than
    /// the expiration threshold leaves the table and the cache, then, if the
    /// cache is at or above its eviction trigger, the least recently used
    /// entries are invalidated until occupancy is back at the target ratio.
    /// After the lock is released the stores are verified; the result is
    /// only logged and counted.
    pub async fn sweep(&self) -> SweepReport {
        let mut report = {
            let mut stores = self.stores.write().await;
            let Stores { table, cache, .. } = &mut *stores;
            let now = self.clock.now();

            let mut report = SweepReport {
                cache_purged: cache.purge_expired(),
                ..SweepReport::default()
            };

            for id in table.expired_ids(now, to_time_delta(self.settings.expiration)) {
                table.remove(id);
                report.expired += 1;
                if let Err(err) = cache.invalidate(id) {
                    self.metrics.record_invalidation_failure();
                    warn!(id, error = %err, "Failed to invalidate expired incident");
                }
            }

            report.evicted = self.relieve_cache_pressure(cache);
            report
        };

        self.metrics.record_sweep(report.expired, report.evicted);

        let consistency = self.verify_consistency().await;
        report.inconsistencies = consistency.divergent_keys();

        if report.expired > 0 || report.evicted > 0 {
            info!(
                expired = report.expired,
                evicted = report.evicted,
                cache_purged = report.cache_purged,
                "Sweep finished"
            );
        } else {
            debug!(cache_purged = report.cache_purged, "Sweep found nothing to remove");
        }

        report
    }

    /// Invalidates cache entries once occupancy reaches the trigger ratio.
    ///
    /// Returns how many entries were invalidated.
    fn relieve_cache_pressure(&self, cache: &mut C) -> usize {
        let capacity = cache.capacity();
        if capacity == 0 {
            return 0;
        }

        let occupancy = cache.len();
        let trigger = (capacity as f64 * self.settings.eviction_trigger_ratio).ceil() as usize;
        if occupancy < trigger {
            return 0;
        }

        let target = (capacity as f64 * self.settings.eviction_target_ratio).floor() as usize;
        let excess = occupancy.saturating_sub(target);
        if excess == 0 {
            return 0;
        }

        let victims = cache.eviction_candidates(excess);
        match cache.invalidate_all(&victims) {
            Ok(()) => {
                info!(
                    evicted = victims.len(),
                    occupancy, capacity, "Relieved cache capacity pressure"
                );
                victims.len()
            }
            Err(err) => {
                self.metrics.record_invalidation_failure();
                warn!(
                    batch = victims.len(),
                    error = %err,
                    "Failed to evict cache batch"
                );
                0
            }
        }
    }
}
