//! Person API route configuration.

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

/// Creates all routes.
///
/// # Routes
///
/// - `GET /health` - Health check
/// - `POST /api/person` - Decode a person and send it back
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/api/person", post(handlers::person_handler))
        .with_state(state)
}
