//! Route configuration that maps HTTP paths to handlers.

pub mod person_routes;

pub use person_routes::create_routes;
