//! Health check endpoint handler.
//!
//! Provides a simple health check endpoint for monitoring and load balancers.

use axum::{Json, http::StatusCode, response::IntoResponse};
use tracing::debug;

/// Handler for the health check endpoint.
///
/// # HTTP Request
///
/// `GET [base]/health`
///
/// # Response
///
/// - `200 OK` with `{"status": "healthy"}`
pub async fn health_handler() -> impl IntoResponse {
    debug!("Processing health check request");
    (StatusCode::OK, Json(serde_json::json!({ "status": "healthy" })))
}
