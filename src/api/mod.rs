//! HTTP API layer for the action gateway.
//!
//! Provides the action endpoint, CORS handling and a health check.

pub mod handlers;
mod routes;
mod types;

pub use routes::{build_router, CORS_ALLOW_HEADERS};
pub use types::HealthResponse;
