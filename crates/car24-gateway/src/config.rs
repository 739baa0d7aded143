use std::time::Duration;

use car24_core::AppError;

const DEFAULT_HTTP_PORT: u16 = 8080;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// HTTP-side settings of the gateway. Backend addresses live in
/// [`car24_client::BackendConfig`].
#[derive(Clone)]
pub struct GatewayConfig {
    pub http_port: u16,
    /// HS256 key for session tokens.
    pub secret_key: String,
    /// Require a session token on the resource routes.
    pub require_auth: bool,
    pub request_timeout: Duration,
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("http_port", &self.http_port)
            .field("secret_key", &"<redacted>")
            .field("require_auth", &self.require_auth)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl GatewayConfig {
    /// Read configuration from environment variables.
    ///
    /// - `SECRET_KEY` (required, non-empty)
    /// - `HTTP_PORT` (default 8080)
    /// - `GATEWAY_REQUIRE_AUTH` (`true`/`false`, default false)
    /// - `REQUEST_TIMEOUT_SECS` (default 30)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let secret_key = lookup("SECRET_KEY")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::ConfigError("SECRET_KEY must be set".into()))?;

        let http_port = match lookup("HTTP_PORT") {
            None => DEFAULT_HTTP_PORT,
            Some(raw) => raw.trim_start_matches(':').parse().map_err(|_| {
                AppError::ConfigError(format!("Invalid HTTP_PORT '{raw}': must be a port number"))
            })?,
        };

        let require_auth = match lookup("GATEWAY_REQUIRE_AUTH").as_deref() {
            None | Some("") => false,
            Some(raw) => match raw.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => {
                    return Err(AppError::ConfigError(format!(
                        "Invalid GATEWAY_REQUIRE_AUTH '{raw}': expected true or false"
                    )));
                }
            },
        };

        let timeout_secs = match lookup("REQUEST_TIMEOUT_SECS") {
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    AppError::ConfigError(format!(
                        "Invalid REQUEST_TIMEOUT_SECS '{raw}': must be a positive integer"
                    ))
                })?,
        };

        Ok(Self {
            http_port,
            secret_key,
            require_auth,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
