//! Route definitions for the API.

use axum::{
    http::{
        header::{ACCESS_CONTROL_ALLOW_HEADERS, AUTHORIZATION, CONTENT_TYPE},
        HeaderName, HeaderValue, StatusCode,
    },
    middleware,
    response::{IntoResponse, Response},
    routing::{any, get},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::handlers;
use crate::error::GatewayError;
use crate::AppState;

/// Value of `Access-Control-Allow-Headers` on every response.
pub const CORS_ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    paths(handlers::dispatch_action, handlers::health_check),
    components(schemas(
        crate::domain::ActionRequest,
        crate::domain::ActionEnvelope,
        crate::error::ErrorResponse,
        crate::api::types::HealthResponse,
    )),
    tags(
        (name = "actions", description = "Action dispatch"),
        (name = "health", description = "Health and status endpoints")
    ),
    info(
        title = "Action Gateway API",
        version = "0.1.0",
        description = "Routes named client actions to third-party APIs using server-held credentials",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Turn the empty 405 of a GET-only route into the standard error envelope.
async fn envelope_method_not_allowed(response: Response) -> Response {
    if response.status() == StatusCode::METHOD_NOT_ALLOWED {
        GatewayError::MalformedRequest("method not allowed".to_string()).into_response()
    } else {
        response
    }
}

/// Build the API router.
///
/// Any path other than `/health` and the docs is treated as the action
/// endpoint, and so is any non-GET method on `/health`. OPTIONS on any path
/// is answered by the CORS layer before a handler or body parsing is reached.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([
            AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            CONTENT_TYPE,
        ]);

    let docs: Router = Router::from(
        SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .layer(middleware::map_response(envelope_method_not_allowed));

    Router::new()
        .route("/", any(handlers::dispatch_action))
        .route(
            "/health",
            get(handlers::health_check).fallback(handlers::dispatch_action),
        )
        .fallback(handlers::dispatch_action)
        .with_state(state)
        .merge(docs)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Outermost, so preflight answers carry the exact list as well.
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(CORS_ALLOW_HEADERS),
        ))
}
