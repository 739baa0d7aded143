use std::fmt;
use std::sync::Arc;

use crate::error::AppError;
use crate::proto::client_service::{ClientPhoneNumberReq, CreateOtp, OtpReceipt, VerifyOtp};
use crate::token::{SessionToken, TokenIssuer};
use crate::traits::IdentityService;
use crate::validation::validate_phone_number;

/// Progress of a verification attempt, recorded in logs when it stops early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyStage {
    Pending,
    CodeChecked,
    IdentityChecked,
    TokenIssued,
}

impl VerifyStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerifyStage::Pending => "pending",
            VerifyStage::CodeChecked => "code_checked",
            VerifyStage::IdentityChecked => "identity_checked",
            VerifyStage::TokenIssued => "token_issued",
        }
    }
}

impl fmt::Display for VerifyStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Phone-number login: code issuance, then verify → existence check → token.
///
/// The two identity calls in [`verify`](Self::verify) run strictly in order:
/// the existence check only happens once the code has been consumed.
#[derive(Clone)]
pub struct OtpFlow {
    identity: Arc<dyn IdentityService>,
    tokens: TokenIssuer,
}

impl OtpFlow {
    pub fn new(identity: Arc<dyn IdentityService>, tokens: TokenIssuer) -> Self {
        Self { identity, tokens }
    }

    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    /// Ask the identity service to generate and send a code.
    ///
    /// The receipt is returned unchanged. Failures are not retried.
    pub async fn issue(&self, request: CreateOtp) -> Result<OtpReceipt, AppError> {
        validate_phone_number(&request.phone_number)?;

        let phone = mask_phone(&request.phone_number);
        tracing::info!(%phone, channel = %request.channel, "Requesting one-time code");

        let receipt = self.identity.create_user_otp(request).await.inspect_err(|e| {
            tracing::warn!(%phone, error = %e, "One-time code request failed");
        })?;

        Ok(receipt)
    }

    /// Verify a code and mint a session token for the phone number's owner.
    ///
    /// 1. Consume the code (`NotFound` → [`AppError::IncorrectCode`])
    /// 2. Look up the account (`NotFound` → [`AppError::NotRegistered`])
    /// 3. Sign a token carrying the account id
    ///
    /// A failure in step 2 does not restore the code consumed in step 1.
    pub async fn verify(&self, code: &str, phone_number: &str) -> Result<SessionToken, AppError> {
        let phone = mask_phone(phone_number);
        let mut stage = VerifyStage::Pending;

        // 1. Code check
        self.identity
            .verify_user_otp(VerifyOtp {
                code: code.to_string(),
                phone_number: phone_number.to_string(),
            })
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    AppError::IncorrectCode
                } else {
                    e
                }
            })
            .inspect_err(|e| tracing::warn!(%phone, %stage, error = %e, "Verification stopped"))?;
        stage = VerifyStage::CodeChecked;

        // 2. Existence check
        let client = self
            .identity
            .check_user(ClientPhoneNumberReq {
                phone_number: phone_number.to_string(),
            })
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    AppError::NotRegistered
                } else {
                    e
                }
            })
            .inspect_err(|e| tracing::warn!(%phone, %stage, error = %e, "Verification stopped"))?;
        stage = VerifyStage::IdentityChecked;

        // 3. Token
        let session = self
            .tokens
            .issue(&client.id)
            .inspect_err(|e| tracing::error!(%phone, %stage, error = %e, "Token signing failed"))?;
        stage = VerifyStage::TokenIssued;

        tracing::info!(%phone, %stage, user_id = %client.id, "Session token issued");
        Ok(session)
    }
}

/// Keep the country prefix and last four digits for logs.
fn mask_phone(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() <= 6 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..3].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}{}{tail}", "*".repeat(chars.len() - 7))
}
