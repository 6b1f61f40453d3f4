//! Error types for the incident store
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Transient failures raised by the bounded cache.
///
/// A failed write leaves the cache exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Cache is full and eviction failed
    #[error("Cache full: {0}")]
    Full(String),

    /// Cache could not service the call right now
    #[error("Cache unavailable: {0}")]
    Unavailable(String),
}

// == Incident Error Enum ==
/// Unified error type for the incident store.
#[derive(Error, Debug)]
pub enum IncidentError {
    /// Missing record or identifier
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Field-level validation failures, one message per failed rule
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Identifier not present in the table
    #[error("Incident with id {0} not found")]
    NotFound(u64),

    /// Cache write failed and the operation was rolled back
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for IncidentError {
    fn into_response(self) -> Response {
        let status = match &self {
            IncidentError::InvalidArgument(_) | IncidentError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            IncidentError::NotFound(_) => StatusCode::NOT_FOUND,
            IncidentError::Cache(_) => StatusCode::SERVICE_UNAVAILABLE,
            IncidentError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match &self {
            IncidentError::Validation(details) => json!({
                "error": "Validation failed",
                "details": details,
            }),
            other => json!({ "error": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the incident store.
pub type Result<T> = std::result::Result<T, IncidentError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn test_not_found_message_names_id() {
        let err = IncidentError::NotFound(1);
        assert_eq!(err.to_string(), "Incident with id 1 not found");
    }

    #[test]
    fn test_cache_error_is_transparent() {
        let err: IncidentError = CacheError::Unavailable("busy".to_string()).into();
        assert_eq!(err.to_string(), "Cache unavailable: busy");
    }

    #[test]
    fn test_error_status_codes() {
        let cases = vec![
            (
                IncidentError::InvalidArgument("x".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                IncidentError::Validation(vec!["Name is required".to_string()]),
                StatusCode::BAD_REQUEST,
            ),
            (IncidentError::NotFound(7), StatusCode::NOT_FOUND),
            (
                IncidentError::Cache(CacheError::Full("full".to_string())),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                IncidentError::Internal("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[tokio::test]
    async fn test_validation_body_lists_details() {
        let response = IncidentError::Validation(vec![
            "Name is required".to_string(),
            "Description is required".to_string(),
        ])
        .into_response();

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "Validation failed");
        assert_eq!(json["details"].as_array().unwrap().len(), 2);
    }
}
