//! API Routes
//!
//! Configures the Axum router with all incident endpoints.

use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_handler, delete_handler, health_handler, list_handler, stats_handler, update_handler,
    AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /incident` - Create an incident
/// - `PUT /incident` - Update an incident
/// - `GET /incident` - List incidents
/// - `DELETE /incident/:id` - Delete an incident
/// - `GET /stats` - Store sizes, cache statistics and engine counters
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/incident",
            get(list_handler).post(create_handler).put(update_handler),
        )
        .route("/incident/:id", delete(delete_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
