use std::time::Duration;

use car24_core::AppError;

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_USER_SERVICE_PORT: u16 = 9101;
const DEFAULT_ORDER_SERVICE_PORT: u16 = 9102;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Host and port of one backend service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceAddress {
    pub host: String,
    pub port: u16,
}

impl ServiceAddress {
    pub fn uri(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// Addresses of the backend services plus the per-call deadline.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Identity service: users and one-time codes.
    pub user_service: ServiceAddress,
    /// Orders and the fleet catalogue (cars, discounts, mechanics, models, tarifs).
    pub order_service: ServiceAddress,
    pub timeout: Duration,
}

impl BackendConfig {
    /// Read configuration from environment variables.
    ///
    /// - `USER_SERVICE_HOST` / `USER_SERVICE_PORT` (default `localhost:9101`)
    /// - `ORDER_SERVICE_HOST` / `ORDER_SERVICE_PORT` (default `localhost:9102`)
    /// - `BACKEND_TIMEOUT_SECS` (optional, defaults to 10)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let user_service = ServiceAddress {
            host: lookup("USER_SERVICE_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_port(
                lookup("USER_SERVICE_PORT"),
                "USER_SERVICE_PORT",
                DEFAULT_USER_SERVICE_PORT,
            )?,
        };
        let order_service = ServiceAddress {
            host: lookup("ORDER_SERVICE_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_port(
                lookup("ORDER_SERVICE_PORT"),
                "ORDER_SERVICE_PORT",
                DEFAULT_ORDER_SERVICE_PORT,
            )?,
        };

        let timeout_secs = match lookup("BACKEND_TIMEOUT_SECS") {
            None => DEFAULT_TIMEOUT_SECS,
            Some(raw) => {
                let parsed: u64 = raw.parse().map_err(|_| {
                    AppError::ConfigError(format!(
                        "Invalid BACKEND_TIMEOUT_SECS '{raw}': must be a positive integer"
                    ))
                })?;
                if parsed == 0 {
                    return Err(AppError::ConfigError(
                        "BACKEND_TIMEOUT_SECS must be at least 1".into(),
                    ));
                }
                parsed
            }
        };

        Ok(Self {
            user_service,
            order_service,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Accepts `9101` as well as the `:9101` form used by older deployments.
fn parse_port(raw: Option<String>, name: &str, default: u16) -> Result<u16, AppError> {
    match raw {
        None => Ok(default),
        Some(raw) => raw.trim_start_matches(':').parse().map_err(|_| {
            AppError::ConfigError(format!("Invalid {name} '{raw}': must be a port number"))
        }),
    }
}
