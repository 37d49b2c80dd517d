//! Server configuration for the person pass-through API.
//!
//! Every setting can be given on the command line or through an environment
//! variable; unset values fall back to the defaults below.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `TWINFORM_SERVER_PORT` | 8080 | Server port |
//! | `TWINFORM_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `TWINFORM_LOG_LEVEL` | info | Log level |
//! | `TWINFORM_MAX_BODY_SIZE` | 1048576 | Max request body (bytes) |
//! | `TWINFORM_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `TWINFORM_PRETTY` | false | Indent response bodies |
//! | `TWINFORM_ENABLE_CORS` | false | Enable CORS |
//! | `TWINFORM_CORS_ORIGINS` | * | Allowed origins |
//!
//! # Example
//!
//! ```rust
//! use twinform_rest::ServerConfig;
//!
//! let config = ServerConfig {
//!     port: 3000,
//!     pretty: true,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use clap::Parser;
use twinform_serde::EncodeOptions;

/// Server configuration for the person pass-through API.
#[derive(Debug, Clone, Parser)]
#[command(name = "twinform")]
#[command(about = "Person record pass-through server speaking JSON and XML")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "TWINFORM_SERVER_PORT", default_value = "8080")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "TWINFORM_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "TWINFORM_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Maximum request body size in bytes.
    #[arg(long, env = "TWINFORM_MAX_BODY_SIZE", default_value = "1048576")]
    pub max_body_size: usize,

    /// Request timeout in seconds.
    #[arg(long, env = "TWINFORM_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Indent response bodies.
    #[arg(long, env = "TWINFORM_PRETTY", default_value = "false")]
    pub pretty: bool,

    /// Enable CORS.
    #[arg(long, env = "TWINFORM_ENABLE_CORS", default_value = "false")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "TWINFORM_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            max_body_size: 1024 * 1024, // 1MiB
            request_timeout: 30,
            pretty: false,
            enable_cors: false,
            cors_origins: "*".to_string(),
        }
    }
}

impl ServerConfig {
    /// Creates a new ServerConfig from environment variables, falling back to
    /// defaults when they cannot be parsed.
    pub fn from_env() -> Self {
        Self::try_parse().unwrap_or_default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Options used when encoding response bodies.
    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions {
            pretty: self.pretty,
        }
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.host.trim().is_empty() {
            errors.push("Host cannot be empty".to_string());
        }

        if self.max_body_size == 0 {
            errors.push("Max body size cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.enable_cors && self.cors_origins.trim().is_empty() {
            errors.push("CORS origins cannot be empty when CORS is enabled".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// Uses ephemeral port 0 and a short timeout.
    pub fn for_testing() -> Self {
        Self {
            port: 0, // Let OS assign port
            log_level: "debug".to_string(),
            request_timeout: 5,
            ..Self::default()
        }
    }
}
