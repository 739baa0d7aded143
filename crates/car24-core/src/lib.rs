pub mod error;
pub mod otp;
pub mod patch;
pub mod proto;
pub mod resource;
pub mod token;
pub mod traits;
pub mod validation;

#[cfg(any(test, feature = "test-util"))]
pub mod testutil;

pub use error::{AppError, UpstreamKind};
pub use otp::{OtpFlow, VerifyStage};
pub use resource::Resource;
pub use token::{SessionClaims, SessionToken, TokenIssuer};
pub use traits::{Backends, CrudService, IdentityService};
