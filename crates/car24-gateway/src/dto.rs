use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// Body of every non-empty response: a status label plus the payload.
///
/// On failure `data` holds the error message.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct Envelope<T> {
    /// `OK`, `CREATED`, `BAD_REQUEST`, `INVALID_ARGUMENT`, `UNAUTHORIZED`,
    /// `GRPC_ERROR` or `INTERNAL_SERVER_ERROR`
    pub status: &'static str,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self { status: "OK", data }
    }

    pub fn created(data: T) -> Self {
        Self {
            status: "CREATED",
            data,
        }
    }
}

/// Error body, documented separately so failures show a plain string payload.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorEnvelope {
    #[schema(example = "INVALID_ARGUMENT")]
    pub status: &'static str,
    #[schema(example = "car id is an invalid uuid")]
    pub data: String,
}

// ---------------------------------------------------------------------------
// OTP
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VerifyOtpQuery {
    /// Code received by the user
    pub otp_code: Option<String>,
    /// Phone number the code was sent to
    pub phone_number: Option<String>,
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// Query string of the list endpoints. Values are validated by the handler.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Records to skip (default 0)
    pub offset: Option<String>,
    /// Page size, 1 to 100 (default 10)
    pub limit: Option<String>,
    /// Free-text filter passed to the backend
    pub search: Option<String>,
}

/// Partial update body: the fields to change, as an open JSON object.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct PatchBody {
    #[schema(value_type = Object, example = json!({"color": "red", "mileage": 12000}))]
    pub data: serde_json::Map<String, serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
}
