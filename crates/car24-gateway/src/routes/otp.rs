use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use car24_core::proto::client_service::{CreateOtp, OtpReceipt};
use car24_core::validation::required;

use crate::dto::{Envelope, ErrorEnvelope, VerifyOtpQuery};
use crate::error::ApiError;
use crate::extract::{JsonBody, QueryParams};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/check",
    request_body = CreateOtp,
    responses(
        (status = 201, description = "Code sent", body = Envelope<OtpReceipt>),
        (status = 400, description = "Malformed body or phone number", body = ErrorEnvelope),
        (status = 500, description = "Identity service failure", body = ErrorEnvelope),
    ),
    tag = "auth"
)]
pub async fn send_otp(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<CreateOtp>,
) -> Result<impl IntoResponse, ApiError> {
    let receipt = state.otp.issue(request).await?;
    Ok((StatusCode::CREATED, Json(Envelope::created(receipt))))
}

#[utoipa::path(
    get,
    path = "/check",
    params(VerifyOtpQuery),
    responses(
        (status = 200, description = "Session token, valid for 10 minutes", body = Envelope<String>),
        (status = 400, description = "Missing input, incorrect code or unregistered number", body = ErrorEnvelope),
        (status = 500, description = "Identity service failure", body = ErrorEnvelope),
    ),
    tag = "auth"
)]
pub async fn verify_otp(
    State(state): State<Arc<AppState>>,
    QueryParams(query): QueryParams<VerifyOtpQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let code = required("otp_code", query.otp_code.as_deref())?;
    let phone_number = required("phone_number", query.phone_number.as_deref())?;

    let session = state.otp.verify(code, phone_number).await?;
    Ok(Json(Envelope::ok(session.token)))
}
