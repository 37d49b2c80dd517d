//! HTTP middleware for the person API.
//!
//! - [`content_type`] - Content negotiation

pub mod content_type;

pub use content_type::{negotiate_response_format, request_format};
