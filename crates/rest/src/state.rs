//! Application state shared by every request handler.

use std::sync::Arc;

use twinform_serde::EncodeOptions;

use crate::config::ServerConfig;

/// Shared application state for the REST API.
///
/// # Example
///
/// ```rust
/// use twinform_rest::{AppState, ServerConfig};
///
/// let state = AppState::new(ServerConfig::default());
/// assert!(!state.encode_options().pretty);
/// ```
#[derive(Debug, Clone)]
pub struct AppState {
    /// Server configuration.
    config: Arc<ServerConfig>,
}

impl AppState {
    /// Creates a new AppState with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Options used when encoding response bodies.
    pub fn encode_options(&self) -> EncodeOptions {
        self.config.encode_options()
    }
}
