//! Incident record
//!
//! The unit stored in both the authoritative table and the cache.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// == Incident ==
/// One tracked incident.
///
/// `id` and `created_at` are fixed at creation; `updated_at` moves forward on
/// every successful update and is the only input to expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Incident {
    /// Stamps a draft with its identifier and creation time.
    pub fn new(id: u64, draft: IncidentDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the revised record, keeping `id` and `created_at`.
    ///
    /// `updated_at` never moves backwards, even if `now` does.
    pub fn revise(&self, update: IncidentUpdate, now: DateTime<Utc>) -> Self {
        Self {
            id: self.id,
            name: update.name,
            description: update.description,
            created_at: self.created_at,
            updated_at: now.max(self.updated_at),
        }
    }
}

// == Incident Draft ==
/// Validated fields for a new incident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncidentDraft {
    pub name: String,
    pub description: String,
}

impl IncidentDraft {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

// == Incident Update ==
/// Validated replacement fields for an existing incident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncidentUpdate {
    pub id: u64,
    pub name: String,
    pub description: String,
}

impl IncidentUpdate {
    pub fn new(id: u64, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn test_new_stamps_both_timestamps() {
        let now = Utc::now();
        let incident = Incident::new(1, IncidentDraft::new("Test Incident", "desc"), now);
        assert_eq!(incident.id, 1);
        assert_eq!(incident.created_at, now);
        assert_eq!(incident.updated_at, now);
    }

    #[test]
    fn test_revise_keeps_identity_and_creation() {
        let created = Utc::now();
        let incident = Incident::new(3, IncidentDraft::new("a", "b"), created);

        let later = created + TimeDelta::seconds(5);
        let revised = incident.revise(IncidentUpdate::new(3, "a", "Updated description"), later);

        assert_eq!(revised.id, 3);
        assert_eq!(revised.created_at, created);
        assert_eq!(revised.updated_at, later);
        assert_eq!(revised.description, "Updated description");
    }

    #[test]
    fn test_revise_never_moves_updated_at_backwards() {
        let created = Utc::now();
        let incident = Incident::new(1, IncidentDraft::new("a", "b"), created);
        let revised = incident.revise(
            IncidentUpdate::new(1, "a", "c"),
            created - TimeDelta::seconds(10),
        );
        assert_eq!(revised.updated_at, created);
    }

    #[test]
    fn test_serializes_camel_case() {
        let incident = Incident::new(1, IncidentDraft::new("n", "d"), Utc::now());
        let json = serde_json::to_value(&incident).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("created_at").is_none());
    }
}
