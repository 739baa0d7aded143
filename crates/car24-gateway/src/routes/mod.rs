use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tower_http::timeout::TimeoutLayer;
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::require_session;
use crate::dto::{ErrorEnvelope, HealthResponse};
use crate::openapi;
use crate::state::AppState;

pub mod crud;
pub mod otp;
pub mod resources;

/// Build the full router with all routes and middleware.
///
/// `/check`, `/health` and the API docs are always public. The resource
/// routes require a session token when `state.require_auth` is set.
pub fn router(state: Arc<AppState>) -> Router {
    let mut api = Router::new()
        .merge(resources::users::router())
        .merge(resources::orders::router())
        .merge(resources::cars::router())
        .merge(resources::discounts::router())
        .merge(resources::mechanics::router())
        .merge(resources::models::router())
        .merge(resources::tarifs::router());

    if state.require_auth {
        api = api.route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));
    }

    let public = Router::new()
        .route("/check", get(otp::verify_otp).post(otp::send_otp))
        .route("/health", get(health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi::api_doc()));

    public.merge(api).with_state(state)
}

/// Bound every request to `timeout`. An expired request answers 504 with an
/// error envelope.
pub fn with_request_timeout(router: Router, timeout: Duration) -> Router {
    router
        .layer(TimeoutLayer::with_status_code(
            StatusCode::GATEWAY_TIMEOUT,
            timeout,
        ))
        .layer(middleware::map_response(envelope_timeout))
}

/// The timeout layer answers with an empty body; handler 504s already carry JSON.
async fn envelope_timeout(response: Response) -> Response {
    if response.status() != StatusCode::GATEWAY_TIMEOUT
        || response.headers().contains_key(CONTENT_TYPE)
    {
        return response;
    }

    tracing::warn!("Request timed out");
    let body = ErrorEnvelope {
        status: "GRPC_ERROR",
        data: "request timed out".to_string(),
    };
    (StatusCode::GATEWAY_TIMEOUT, axum::Json(body)).into_response()
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Gateway is up", body = HealthResponse),
    ),
    tag = "system"
)]
pub async fn health() -> impl IntoResponse {
    axum::Json(HealthResponse { status: "healthy" })
}
