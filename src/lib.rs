//! Incident Manager - an incident store with a bounded, expiring cache
//!
//! An authoritative table of incidents is mirrored into a capacity-bounded
//! cache that serves bulk reads. The engine keeps the two consistent under a
//! single lock, rolls back or absorbs cache failures, and sweeps stale
//! records out of both stores.

pub mod api;
pub mod cache;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use engine::IncidentService;
pub use tasks::spawn_sweep_task;
