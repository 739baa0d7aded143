use std::sync::Arc;

use axum::extract::State;
use axum::http::{Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use car24_core::{AppError, SessionClaims};

use crate::error::ApiError;
use crate::state::AppState;

/// Middleware that validates `Authorization: Bearer <token>` as a session token.
///
/// Verification is offline against the shared secret. On success the claims
/// are inserted into the request extensions for handlers that need them.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    mut request: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    let claims: Result<SessionClaims, AppError> = match token {
        Some(token) => state.tokens().verify(token.trim()),
        None => Err(AppError::Unauthorized(
            "Missing or invalid Authorization header. Expected: Bearer <token>".to_string(),
        )),
    };

    match claims {
        Ok(claims) => {
            tracing::debug!(user_id = %claims.id, "Session accepted");
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(e) => ApiError(e).into_response(),
    }
}
