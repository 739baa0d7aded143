use car24_core::{Backends, OtpFlow, TokenIssuer};

/// Shared application state, available to all route handlers via `State<Arc<AppState>>`.
pub struct AppState {
    pub backends: Backends,
    pub otp: OtpFlow,
    /// Resource routes demand a session token when set.
    pub require_auth: bool,
}

impl AppState {
    pub fn new(backends: Backends, tokens: TokenIssuer, require_auth: bool) -> Self {
        let otp = OtpFlow::new(backends.identity.clone(), tokens);
        Self {
            backends,
            otp,
            require_auth,
        }
    }

    pub fn tokens(&self) -> &TokenIssuer {
        self.otp.tokens()
    }
}
