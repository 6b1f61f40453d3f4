//! Consistency verification
//!
//! Compares the table with the cache's live entries. Divergence is reported,
//! never repaired here.

use serde::Serialize;
use tracing::{debug, error};

use super::IncidentService;
use crate::cache::RecordCache;
use crate::store::RecordTable;

// == Consistency Report ==
/// Keys on which the table and the cache disagree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyReport {
    /// In the table but not live in the cache
    pub missing_from_cache: Vec<u64>,
    /// Live in the cache but not in the table
    pub unknown_to_table: Vec<u64>,
    /// Present in both with different contents
    pub mismatched: Vec<u64>,
}

impl ConsistencyReport {
    /// Builds a report from a single view of both stores.
    pub fn compare<C: RecordCache>(table: &RecordTable, cache: &C) -> Self {
        let mut report = Self::default();

        for incident in table.iter() {
            match cache.peek(incident.id) {
                None => report.missing_from_cache.push(incident.id),
                Some(cached) if cached != incident => report.mismatched.push(incident.id),
                Some(_) => {}
            }
        }

        report.unknown_to_table = cache
            .keys()
            .into_iter()
            .filter(|id| !table.contains(*id))
            .collect();

        report
    }

    pub fn is_consistent(&self) -> bool {
        self.divergent_keys() == 0
    }

    /// Total number of keys in any of the three lists.
    pub fn divergent_keys(&self) -> usize {
        self.missing_from_cache.len() + self.unknown_to_table.len() + self.mismatched.len()
    }
}

impl<C: RecordCache> IncidentService<C> {
    // == Verify ==
    /// Compares both stores under the read lock and reports any divergence.
    ///
    /// Divergence is logged at error level and counted; the stores are not
    /// modified.
    pub async fn verify_consistency(&self) -> ConsistencyReport {
        let report = {
            let stores = self.stores.read().await;
            ConsistencyReport::compare(&stores.table, &stores.cache)
        };

        if report.is_consistent() {
            debug!("Table and cache are consistent");
        } else {
            self.metrics.record_inconsistencies(report.divergent_keys());
            error!(
                missing_from_cache = report.missing_from_cache.len(),
                unknown_to_table = report.unknown_to_table.len(),
                mismatched = report.mismatched.len(),
                "Table and cache diverge"
            );
        }

        report
    }
}
