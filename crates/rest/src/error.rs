//! Error types for the person pass-through API.
//!
//! Failures are answered with a plain-text body that echoes the request's
//! `Content-Type`:
//!
//! ```text
//! Error: <message> (Content-Type: <content type or null>)
//! ```
//!
//! # Error Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | Codec (malformed input, bad field value, unknown field) | 400 |
//! | Codec (output could not be written) | 500 |
//! | UnsupportedMediaType | 415 |
//! | NotAcceptable | 406 |
//! | Internal | 500 |

use axum::{
    http::{Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;
use twinform_serde::CodecError;

/// The primary error type for REST API operations.
#[derive(Debug, Error)]
pub enum RestError {
    /// The body could not be decoded, or the record could not be encoded.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The request `Content-Type` is missing or names no supported format (HTTP 415).
    #[error("Content type '{}' is not supported", .content_type.as_deref().unwrap_or("null"))]
    UnsupportedMediaType {
        /// The rejected content type, if the header was present.
        content_type: Option<String>,
    },

    /// No format named by `Accept` can be produced (HTTP 406).
    #[error("None of the accepted types '{accept}' can be produced")]
    NotAcceptable {
        /// The `Accept` header as received.
        accept: String,
    },

    /// Internal server error (HTTP 500).
    #[error("{message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl RestError {
    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::Codec(err) if err.is_input_error() => StatusCode::BAD_REQUEST,
            RestError::Codec(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RestError::UnsupportedMediaType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            RestError::NotAcceptable { .. } => StatusCode::NOT_ACCEPTABLE,
            RestError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Attaches the request the error happened in, producing a response.
    pub fn in_request(
        self,
        method: &Method,
        uri: &Uri,
        content_type: Option<&str>,
    ) -> ErrorResponse {
        ErrorResponse {
            error: self,
            method: method.clone(),
            uri: uri.clone(),
            content_type: content_type.map(str::to_owned),
        }
    }
}

/// A [`RestError`] together with the request it answers.
#[derive(Debug)]
pub struct ErrorResponse {
    /// The failure.
    pub error: RestError,
    /// Request method.
    pub method: Method,
    /// Request URI.
    pub uri: Uri,
    /// Request `Content-Type`, if any.
    pub content_type: Option<String>,
}

impl ErrorResponse {
    /// Renders the plain-text body.
    pub fn body(&self) -> String {
        format!(
            "Error: {} (Content-Type: {})",
            self.error,
            self.content_type.as_deref().unwrap_or("null")
        )
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status = self.error.status_code();
        error!(
            method = %self.method,
            uri = %self.uri,
            status = status.as_u16(),
            "Error processing request: {}",
            self.error
        );

        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.body(),
        )
            .into_response()
    }
}

/// Result type alias for REST operations.
pub type RestResult<T> = Result<T, RestError>;
