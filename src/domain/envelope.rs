//! Success envelope.
//!
//! The error side lives in `crate::error`. Both shapes are fixed no matter
//! which handler produced them.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// `{ data, status }` returned for every dispatched action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ActionEnvelope {
    /// Upstream JSON body, verbatim.
    #[schema(value_type = Object)]
    pub data: Value,
    /// Upstream HTTP status, verbatim.
    pub status: u16,
}

impl ActionEnvelope {
    pub fn new(data: Value, status: u16) -> Self {
        Self { data, status }
    }

    /// Envelope for answers produced locally rather than by an upstream.
    pub fn ok(data: Value) -> Self {
        Self::new(data, StatusCode::OK.as_u16())
    }
}

impl IntoResponse for ActionEnvelope {
    fn into_response(self) -> Response {
        // The HTTP status mirrors the upstream one, so a 500 from the
        // provider stays a 500 here instead of becoming a router error.
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::BAD_GATEWAY);
        (status, Json(self)).into_response()
    }
}
