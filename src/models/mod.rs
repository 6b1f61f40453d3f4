//! Record and transfer types for the incident store
//!
//! `incident` holds the domain record the engine stores; `requests` and
//! `responses` are the DTOs used for HTTP (de)serialization.

pub mod incident;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use incident::{Incident, IncidentDraft, IncidentUpdate};
pub use requests::{CreateIncidentRequest, UpdateIncidentRequest};
pub use responses::{DeleteResponse, HealthResponse, StatsResponse};
