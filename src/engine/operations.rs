//! Record operations: create, update, delete and list.

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use super::guard::{read_interruptibly, write_interruptibly, InterruptSignal};
use super::{IncidentService, Stores};
use crate::cache::RecordCache;
use crate::clock::to_time_delta;
use crate::error::{IncidentError, Result};
use crate::models::{Incident, IncidentDraft, IncidentUpdate};

impl<C: RecordCache> IncidentService<C> {
    // == Create ==
    /// Stores a new incident in the table and the cache.
    ///
    /// If the cache refuses the write, the table row is removed again and the
    /// cache error is returned; nothing of the attempt remains visible.
    pub async fn create(&self, draft: IncidentDraft) -> Result<Incident> {
        let mut stores = self.stores.write().await;

        let incident = Incident::new(self.ids.next_id(), draft, self.clock.now());
        stores.table.put(incident.clone());

        if let Err(err) = stores.cache.put(incident.id, incident.clone()) {
            stores.table.remove(incident.id);
            self.metrics.record_cache_write_failure();
            self.metrics.record_rollback();
            error!(
                id = incident.id,
                error = %err,
                "Failed to cache new incident, table insert rolled back"
            );
            return Err(err.into());
        }

        debug!(id = incident.id, "Incident created");
        Ok(incident)
    }

    // == Update ==
    /// Replaces the name and description of an existing incident.
    ///
    /// The cache write is attempted up to `update_retry_limit` times. If
    /// every attempt fails the table row is restored to its previous value
    /// and the failure is logged, but the revised record is still returned.
    pub async fn update(&self, update: IncidentUpdate) -> Result<Incident> {
        let id = update.id;
        let mut stores = self.stores.write().await;

        let Some(previous) = stores.table.get(id).cloned() else {
            warn!(id, "Attempted to update unknown incident");
            return Err(IncidentError::NotFound(id));
        };

        let revised = previous.revise(update, self.clock.now());
        stores.table.put(revised.clone());

        let attempts = self.settings.update_retry_limit.max(1);
        let mut mirrored = false;
        for attempt in 1..=attempts {
            match stores.cache.put(id, revised.clone()) {
                Ok(()) => {
                    mirrored = true;
                    break;
                }
                Err(err) => {
                    self.metrics.record_cache_write_failure();
                    warn!(id, attempt, error = %err, "Failed to cache updated incident");
                }
            }
        }

        if !mirrored {
            stores.table.put(previous);
            self.metrics.record_rollback();
            error!(
                id,
                attempts, "Cache update failed on every attempt, table row restored"
            );
        }

        Ok(revised)
    }

    // == Delete ==
    /// Removes an incident from the table and drops it from the cache.
    ///
    /// A failed cache invalidation is logged only; the entry lingers until
    /// it expires, is evicted, or a sweep runs.
    pub async fn delete(&self, id: u64) -> Result<()> {
        let mut stores = self.stores.write().await;

        if stores.table.remove(id).is_none() {
            warn!(id, "Attempted to delete unknown incident");
            return Err(IncidentError::NotFound(id));
        }

        if let Err(err) = stores.cache.invalidate(id) {
            self.metrics.record_invalidation_failure();
            error!(id, error = %err, "Failed to invalidate deleted incident");
        }

        debug!(id, "Incident deleted");
        Ok(())
    }

    // == List ==
    /// Returns all incidents, usually straight from the cache.
    ///
    /// See [`IncidentService::list_interruptible`].
    pub async fn list(&self) -> Vec<Incident> {
        self.list_interruptible(&mut InterruptSignal::never()).await
    }

    /// Returns all incidents, giving up if `signal` is raised while waiting.
    ///
    /// When the refresh interval has elapsed and the cache holds fewer live
    /// entries than the table, every table row is written back into the
    /// cache under the write lock and the table's rows are returned.
    /// Otherwise the cache's live entries are returned under the read lock,
    /// which may omit records the cache has not caught up with.
    ///
    /// An interrupted call returns an empty list and leaves `signal` raised.
    /// An empty result can therefore mean "cancelled" as well as "no records".
    pub async fn list_interruptible(&self, signal: &mut InterruptSignal) -> Vec<Incident> {
        {
            let stores = match read_interruptibly(&self.stores, signal).await {
                Ok(stores) => stores,
                Err(err) => return self.cancelled_read(err),
            };
            if !self.refresh_due(&stores, self.clock.now()) {
                return stores.cache.snapshot();
            }
        }

        self.refresh_cache(signal).await
    }

    /// Rebuilds the cache from the table under the write lock.
    ///
    /// The refresh rule is checked again once the lock is held. If another
    /// caller refreshed in the meantime, the cache snapshot is returned as is.
    async fn refresh_cache(&self, signal: &mut InterruptSignal) -> Vec<Incident> {
        let mut stores = match write_interruptibly(&self.stores, signal).await {
            Ok(stores) => stores,
            Err(err) => return self.cancelled_read(err),
        };

        if !self.refresh_due(&stores, self.clock.now()) {
            debug!("Cache refreshed while waiting for the lock, serving snapshot");
            return stores.cache.snapshot();
        }

        let mut incidents = Vec::with_capacity(stores.table.len());
        let mut failed = 0usize;
        let Stores { table, cache, .. } = &mut *stores;
        for incident in table.iter() {
            if let Err(err) = cache.put(incident.id, incident.clone()) {
                failed += 1;
                self.metrics.record_cache_write_failure();
                warn!(id = incident.id, error = %err, "Failed to cache incident during refresh");
            }
            incidents.push(incident.clone());
        }
        stores.last_cache_refresh = self.clock.now();
        self.metrics.record_cache_refresh();

        info!(
            records = incidents.len(),
            failed, "Cache refreshed from table"
        );
        incidents
    }

    fn refresh_due(&self, stores: &Stores<C>, now: DateTime<Utc>) -> bool {
        now - stores.last_cache_refresh > to_time_delta(self.settings.refresh_interval)
            && stores.cache.len() < stores.table.len()
    }

    fn cancelled_read(&self, err: super::Interrupted) -> Vec<Incident> {
        self.metrics.record_cancelled_read();
        warn!(error = %err, "List abandoned, returning no incidents");
        Vec::new()
    }
}
