//! # twinform-rest - Person pass-through API
//!
//! HTTP front end for the twinform codec. A client posts a person record in
//! JSON or XML and receives the same record back in the format it asks for,
//! so one request can translate between the two.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use twinform_rest::{ServerConfig, create_app_with_config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::default();
//!     let app = create_app_with_config(config.clone());
//!
//!     let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Interaction | HTTP Method | URL Pattern |
//! |------------|-------------|-------------|
//! | echo person | POST | `/api/person` |
//! | health | GET | `/health` |
//!
//! ## HTTP Headers
//!
//! - `Content-Type` - Request body format: `application/json`, `application/xml`,
//!   `text/xml`, or any `+json` / `+xml` type
//! - `Accept` - Response format, JSON when absent or `*/*`
//!
//! ## Error Handling
//!
//! Errors are answered with a plain-text body,
//! `Error: <message> (Content-Type: <request content type>)`:
//!
//! | HTTP Status | Cause |
//! |-------------|-------|
//! | 400 | Malformed body, invalid field value, unknown address field |
//! | 406 | No acceptable response format |
//! | 413 | Body larger than the configured limit |
//! | 415 | Missing or unsupported `Content-Type` |
//! | 500 | Response could not be encoded |
//!
//! ## Architecture
//!
//! - [`error`] - Error types and plain-text error responses
//! - [`config`] - Server configuration
//! - [`state`] - Application state
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Content negotiation
//! - [`responses`] - Response encoding
//! - [`routing`] - Route configuration

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod responses;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{ErrorResponse, RestError, RestResult};
pub use state::AppState;

use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, StatusCode},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application with default configuration.
///
/// For more control, use [`create_app_with_config`].
pub fn create_app() -> Router {
    create_app_with_config(ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// # Example
///
/// ```rust
/// use twinform_rest::{ServerConfig, create_app_with_config};
///
/// let config = ServerConfig {
///     pretty: true,
///     enable_cors: true,
///     ..Default::default()
/// };
/// let app = create_app_with_config(config);
/// ```
pub fn create_app_with_config(config: ServerConfig) -> Router {
    info!(
        pretty = config.pretty,
        max_body_size = config.max_body_size,
        "Creating person API server"
    );

    let state = AppState::new(config.clone());
    let router = routing::create_routes(state);

    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout),
        ));

    let router = router.layer(DefaultBodyLimit::max(config.max_body_size));

    // Add CORS if enabled
    let router = if config.enable_cors {
        router.layer(build_cors_layer(&config))
    } else {
        router
    };

    router.layer(service_builder)
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.cors_origins.trim() == "*" {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup. `RUST_LOG` overrides
/// `level` when set.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "twinform_rest={level},twinform_serde={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
