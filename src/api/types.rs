//! API request and response types.
//!
//! The action envelopes themselves live in `crate::domain` and
//! `crate::error`; this module only holds the service-level endpoints.

use serde::Serialize;
use utoipa::ToSchema;

// ==================== Health ====================

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Registered action names.
    pub actions: Vec<String>,
    /// Timestamp.
    pub timestamp: String,
}
