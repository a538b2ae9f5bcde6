//! HTTP request handlers.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    response::{IntoResponse, Response},
    Json,
};
use tracing::Instrument;
use uuid::Uuid;

use crate::api::types::HealthResponse;
use crate::error::GatewayError;
use crate::AppState;

/// Dispatch a client action to its upstream integration.
///
/// POST /
#[utoipa::path(
    post,
    path = "/",
    request_body = crate::domain::ActionRequest,
    responses(
        (status = 200, description = "Upstream response, passed through", body = crate::domain::ActionEnvelope),
        (status = 400, description = "Malformed request, unknown action, missing secret or upstream failure", body = crate::error::ErrorResponse)
    ),
    tag = "actions"
)]
pub async fn dispatch_action(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("action_request", %request_id);

    async move {
        let body = match body {
            Ok(body) => body,
            Err(rejection) => {
                return GatewayError::MalformedRequest(rejection.body_text()).into_response()
            }
        };

        match state.router.handle(&body).await {
            Ok(envelope) => envelope.into_response(),
            Err(e) => e.into_response(),
        }
    }
    .instrument(span)
    .await
}

/// Health check endpoint.
///
/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let actions = state
        .router
        .registry()
        .names()
        .into_iter()
        .map(String::from)
        .collect();

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        actions,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
