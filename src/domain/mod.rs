//! Domain primitives, the signup flow, and its ports.
//!
//! Purpose: keep the orchestration and its types transport-agnostic.
//! Inbound adapters translate HTTP payloads into these types; outbound
//! adapters implement the ports in [`ports`].

pub mod avatar;
pub mod credentials;
pub mod error;
pub mod header;
pub mod ports;
pub mod profile;
pub mod signup;
mod signup_service;
pub mod trace_id;

pub use self::avatar::{AvatarError, AvatarJpeg, AVATAR_DIMENSION};
pub use self::credentials::{CredentialsValidationError, EmailAddress, SignupCredentials};
pub use self::error::{Error, ErrorCode};
pub use self::header::{HeaderView, ProfileBadge};
pub use self::profile::{
    AccountId, AvatarPath, CurrentUser, NewProfile, ProfileValidationError, Username,
};
pub use self::signup::{
    SignupError, SignupForm, SignupReceipt, SignupState, SignupStateError, SignupStep,
    UNKNOWN_ERROR_MESSAGE,
};
pub use self::signup_service::SignupService;
pub use self::trace_id::{TraceId, TRACE_ID_HEADER};

/// Convenient result alias for handlers returning domain errors.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use photofeed::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("login required"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
