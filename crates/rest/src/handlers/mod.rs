//! HTTP request handlers.
//!
//! - [`person`] - Person pass-through
//! - [`health`] - Health check endpoint

pub mod health;
pub mod person;

pub use health::health_handler;
pub use person::person_handler;
