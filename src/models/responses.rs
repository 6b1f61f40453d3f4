//! Response DTOs for the incident API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::engine::{EngineMetricsSnapshot, EngineStats};

/// Response body for the DELETE operation (DELETE /incident/:id)
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The id that was deleted
    pub id: u64,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(id: u64) -> Self {
        Self {
            message: format!("Incident {} deleted successfully", id),
            id,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Records in the authoritative table
    pub table_entries: usize,
    /// Entries currently held by the cache
    pub cache_entries: usize,
    /// Cache capacity
    pub cache_capacity: usize,
    /// Entries dropped by the cache's own capacity policy
    pub evictions: u64,
    /// Entries dropped by the cache's own TTL
    pub expirations: u64,
    /// Engine failure and maintenance counters
    pub engine: EngineMetricsSnapshot,
}

impl From<EngineStats> for StatsResponse {
    fn from(stats: EngineStats) -> Self {
        Self {
            table_entries: stats.table_entries,
            cache_entries: stats.cache_entries,
            cache_capacity: stats.cache_capacity,
            evictions: stats.cache.evictions,
            expirations: stats.cache.expirations,
            engine: stats.metrics,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
