use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use car24_core::{AppError, UpstreamKind};

use crate::dto::ErrorEnvelope;

/// Wrapper so we can implement `IntoResponse` for `AppError`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// HTTP status and envelope label for the wrapped error.
    pub fn status(&self) -> (StatusCode, &'static str) {
        match &self.0 {
            AppError::Validation(_) | AppError::IncorrectCode | AppError::NotRegistered => {
                (StatusCode::BAD_REQUEST, "INVALID_ARGUMENT")
            }
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            AppError::Upstream { kind, .. } => (upstream_status(*kind), "GRPC_ERROR"),
            AppError::Token(_) | AppError::ConfigError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_SERVER_ERROR")
            }
        }
    }
}

fn upstream_status(kind: UpstreamKind) -> StatusCode {
    match kind {
        UpstreamKind::InvalidArgument => StatusCode::BAD_REQUEST,
        UpstreamKind::Unauthenticated => StatusCode::UNAUTHORIZED,
        UpstreamKind::PermissionDenied => StatusCode::FORBIDDEN,
        UpstreamKind::NotFound => StatusCode::NOT_FOUND,
        UpstreamKind::AlreadyExists => StatusCode::CONFLICT,
        UpstreamKind::FailedPrecondition => StatusCode::PRECONDITION_FAILED,
        UpstreamKind::ResourceExhausted => StatusCode::TOO_MANY_REQUESTS,
        UpstreamKind::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        UpstreamKind::DeadlineExceeded => StatusCode::GATEWAY_TIMEOUT,
        UpstreamKind::Cancelled
        | UpstreamKind::Unimplemented
        | UpstreamKind::Internal
        | UpstreamKind::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, label) = self.status();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self.0, "Request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self.0, "Request rejected");
        }

        let body = ErrorEnvelope {
            status: label,
            data: self.0.to_string(),
        };

        (status, axum::Json(body)).into_response()
    }
}
