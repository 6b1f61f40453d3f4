//! Authoritative Table
//!
//! Plain map from id to incident. It has no synchronization of its own;
//! the engine only touches it while holding the store guard.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeDelta, Utc};

use crate::models::Incident;

// == Record Table ==
/// The source of truth for incidents, ordered by id.
#[derive(Debug, Default, Clone)]
pub struct RecordTable {
    rows: BTreeMap<u64, Incident>,
}

impl RecordTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: u64) -> Option<&Incident> {
        self.rows.get(&id)
    }

    /// Inserts or replaces the row for `incident.id`, returning the old row.
    pub fn put(&mut self, incident: Incident) -> Option<Incident> {
        self.rows.insert(incident.id, incident)
    }

    pub fn remove(&mut self, id: u64) -> Option<Incident> {
        self.rows.remove(&id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.rows.contains_key(&id)
    }

    /// Iterates rows in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Incident> {
        self.rows.values()
    }

    /// Ids of rows whose last update is more than `threshold` before `now`.
    pub fn expired_ids(&self, now: DateTime<Utc>, threshold: TimeDelta) -> Vec<u64> {
        self.rows
            .values()
            .filter(|incident| now - incident.updated_at > threshold)
            .map(|incident| incident.id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
