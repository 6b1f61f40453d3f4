//! API Module
//!
//! HTTP handlers and routing for the incident REST API.
//!
//! # Endpoints
//! - `POST /incident` - Create an incident
//! - `PUT /incident` - Update an incident
//! - `GET /incident` - List incidents
//! - `DELETE /incident/:id` - Delete an incident
//! - `GET /stats` - Store and engine statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
