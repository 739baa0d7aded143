use std::fmt;

use thiserror::Error;

/// Classification of a failed backend call, independent of the transport.
///
/// The gRPC client maps status codes onto this enum so callers can branch on
/// the kind of failure instead of on the backend's message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamKind {
    Cancelled,
    InvalidArgument,
    DeadlineExceeded,
    NotFound,
    AlreadyExists,
    PermissionDenied,
    ResourceExhausted,
    FailedPrecondition,
    Unimplemented,
    Unavailable,
    Unauthenticated,
    Internal,
    Unknown,
}

impl UpstreamKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpstreamKind::Cancelled => "cancelled",
            UpstreamKind::InvalidArgument => "invalid_argument",
            UpstreamKind::DeadlineExceeded => "deadline_exceeded",
            UpstreamKind::NotFound => "not_found",
            UpstreamKind::AlreadyExists => "already_exists",
            UpstreamKind::PermissionDenied => "permission_denied",
            UpstreamKind::ResourceExhausted => "resource_exhausted",
            UpstreamKind::FailedPrecondition => "failed_precondition",
            UpstreamKind::Unimplemented => "unimplemented",
            UpstreamKind::Unavailable => "unavailable",
            UpstreamKind::Unauthenticated => "unauthenticated",
            UpstreamKind::Internal => "internal",
            UpstreamKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for UpstreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application-wide error types for the gateway.
#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed path or query input. Rejected before any backend call.
    #[error("{0}")]
    Validation(String),

    /// Request body or query string could not be decoded.
    #[error("{0}")]
    BadRequest(String),

    /// The one-time code did not match an unconsumed code for the phone number.
    #[error("incorrect code")]
    IncorrectCode,

    /// The code matched but no account is registered for the phone number.
    #[error("should register")]
    NotRegistered,

    /// A backend call failed. `message` is the backend's description, verbatim.
    #[error("{message}")]
    Upstream { kind: UpstreamKind, message: String },

    /// Missing, malformed or expired session token.
    #[error("{0}")]
    Unauthorized(String),

    /// Session token could not be signed.
    #[error("Token error: {0}")]
    Token(String),

    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    pub fn upstream(kind: UpstreamKind, message: impl Into<String>) -> Self {
        AppError::Upstream {
            kind,
            message: message.into(),
        }
    }

    /// Returns true if the backend reported that no matching record exists.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AppError::Upstream {
                kind: UpstreamKind::NotFound,
                ..
            }
        )
    }

    /// Returns true for errors caused by the caller's input rather than a fault.
    pub fn is_client_error(&self) -> bool {
        match self {
            AppError::Validation(_)
            | AppError::BadRequest(_)
            | AppError::IncorrectCode
            | AppError::NotRegistered
            | AppError::Unauthorized(_) => true,
            AppError::Upstream { kind, .. } => matches!(
                kind,
                UpstreamKind::InvalidArgument
                    | UpstreamKind::NotFound
                    | UpstreamKind::AlreadyExists
                    | UpstreamKind::FailedPrecondition
                    | UpstreamKind::PermissionDenied
                    | UpstreamKind::Unauthenticated
            ),
            _ => false,
        }
    }
}
