//! Error types for the action gateway.
//!
//! Every dispatch failure collapses into the same `{ "error": ... }` envelope
//! with status 400. The variants only differ in what gets logged.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Unified error type for a single action dispatch.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Body was not JSON or did not carry an `action`.
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// No handler is registered under the requested name.
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    /// A secret the handler needs is not provisioned. Carries the secret
    /// *name*, never its value.
    #[error("{0} not set")]
    Configuration(String),

    /// The upstream call failed or returned something unusable.
    #[error("Upstream error: {0}")]
    Upstream(String),
}

impl GatewayError {
    /// Stable machine-readable code, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::MalformedRequest(_) => "MALFORMED_REQUEST",
            GatewayError::UnknownAction(_) => "UNKNOWN_ACTION",
            GatewayError::Configuration(_) => "CONFIGURATION_ERROR",
            GatewayError::Upstream(_) => "UPSTREAM_ERROR",
        }
    }

    /// Whether the failure was caused by the caller rather than the deployment.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            GatewayError::MalformedRequest(_) | GatewayError::UnknownAction(_)
        )
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(e: serde_json::Error) -> Self {
        GatewayError::MalformedRequest(e.to_string())
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GatewayError::Upstream("request timed out".to_string())
        } else {
            GatewayError::Upstream(e.without_url().to_string())
        }
    }
}

/// Error envelope returned to API clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let message = self.to_string();

        if self.is_client_error() {
            tracing::warn!(kind = self.kind(), error = %message, "Action rejected");
        } else {
            // Same envelope as client errors, but flagged as a deployment fault.
            tracing::error!(kind = self.kind(), error = %message, "Action failed");
        }

        let body = ErrorResponse { error: message };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

/// Result type alias for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;
