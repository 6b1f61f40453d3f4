//! API Handlers
//!
//! HTTP request handlers for each incident endpoint.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::config::Config;
use crate::engine::IncidentService;
use crate::error::{IncidentError, Result};
use crate::models::{
    CreateIncidentRequest, DeleteResponse, HealthResponse, Incident, StatsResponse,
    UpdateIncidentRequest,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The consistency engine; it does its own locking
    pub service: Arc<IncidentService>,
}

impl AppState {
    /// Creates a new AppState around an existing engine.
    pub fn new(service: Arc<IncidentService>) -> Self {
        Self { service }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(IncidentService::from_config(config)))
    }
}

/// Unwraps a JSON body, treating a literal `null` as a missing record.
fn require_body<T>(payload: std::result::Result<Json<Option<T>>, JsonRejection>) -> Result<T> {
    match payload {
        Ok(Json(Some(body))) => Ok(body),
        Ok(Json(None)) => Err(IncidentError::InvalidArgument(
            "Incident cannot be null".to_string(),
        )),
        Err(
            rejection @ (JsonRejection::JsonDataError(_)
            | JsonRejection::JsonSyntaxError(_)
            | JsonRejection::MissingJsonContentType(_)),
        ) => Err(IncidentError::InvalidArgument(rejection.body_text())),
        Err(rejection) => Err(IncidentError::Internal(rejection.body_text())),
    }
}

/// Handler for POST /incident
///
/// Validates the body and creates a new incident.
pub async fn create_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Option<CreateIncidentRequest>>, JsonRejection>,
) -> Result<(StatusCode, Json<Incident>)> {
    let draft = require_body(payload)?.into_draft()?;
    let incident = state.service.create(draft).await?;

    Ok((StatusCode::CREATED, Json(incident)))
}

/// Handler for PUT /incident
///
/// Replaces the name and description of the incident named by `id`.
pub async fn update_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Option<UpdateIncidentRequest>>, JsonRejection>,
) -> Result<Json<Incident>> {
    let update = require_body(payload)?.into_update()?;
    let incident = state.service.update(update).await?;

    Ok(Json(incident))
}

/// Handler for DELETE /incident/:id
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<DeleteResponse>> {
    state.service.delete(id).await?;

    Ok(Json(DeleteResponse::new(id)))
}

/// Handler for GET /incident
///
/// Returns the engine's bulk read, which may lag the table between refreshes.
pub async fn list_handler(State(state): State<AppState>) -> Json<Vec<Incident>> {
    Json(state.service.list().await)
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.service.stats().await))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
