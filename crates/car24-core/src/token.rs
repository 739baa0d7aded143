use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Validity window of a session token, in seconds.
pub const SESSION_TTL_SECS: i64 = 600;

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Identity service id of the user.
    pub id: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expires at (unix seconds)
    pub exp: i64,
}

/// A signed token together with the claims it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken {
    pub token: String,
    pub claims: SessionClaims,
}

/// Mints and verifies HS256 session tokens with a shared secret.
///
/// Any holder of the secret can verify a token offline; no call to the
/// identity service is needed.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: TimeDelta,
}

impl TokenIssuer {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl: TimeDelta::seconds(SESSION_TTL_SECS),
        }
    }

    pub fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    /// Mint a token for `id` valid from now.
    pub fn issue(&self, id: &str) -> Result<SessionToken, AppError> {
        self.issue_at(id, Utc::now())
    }

    /// Mint a token for `id` as if issued at `issued_at`.
    ///
    /// Identical inputs always produce identical claims.
    pub fn issue_at(
        &self,
        id: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<SessionToken, AppError> {
        let claims = SessionClaims {
            id: id.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Token(e.to_string()))?;

        Ok(SessionToken { token, claims })
    }

    /// Check signature and expiry, returning the embedded claims.
    ///
    /// Expiry is exact: a token is rejected as soon as `exp` has passed.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, AppError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::Unauthorized(format!("invalid session token: {e}")))
    }
}
