//! Signup flow model.
//!
//! The flow is an explicit state machine (`Idle → Submitting → Succeeded |
//! Failed`) driven through a fixed sequence of fallible steps. Each step
//! owns one remote call; a failure short-circuits the remainder and tags
//! the error with the step that produced it.

use serde::Serialize;
use thiserror::Error;

use crate::domain::header::routes;
use crate::domain::{AccountId, AvatarPath, SignupCredentials, Username};

/// Message shown when a collaborator failed without saying why.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";

/// Everything the user submits in the signup form.
///
/// The photo bytes are transient: they are consumed during submission and
/// never persisted directly.
#[derive(Debug, Clone)]
pub struct SignupForm {
    credentials: SignupCredentials,
    first_name: String,
    last_name: String,
    username: Username,
    photo: Vec<u8>,
}

impl SignupForm {
    /// Assemble a form from validated parts.
    #[must_use]
    pub fn new(
        credentials: SignupCredentials,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        username: Username,
        photo: Vec<u8>,
    ) -> Self {
        Self {
            credentials,
            first_name: first_name.into(),
            last_name: last_name.into(),
            username,
            photo,
        }
    }

    /// Credentials for the auth collaborator.
    #[must_use]
    pub fn credentials(&self) -> &SignupCredentials {
        &self.credentials
    }

    /// Given name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.first_name.as_str()
    }

    /// Family name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        self.last_name.as_str()
    }

    /// Public handle.
    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Raw photo bytes as submitted.
    #[must_use]
    pub fn photo(&self) -> &[u8] {
        self.photo.as_slice()
    }
}

/// The ordered remote steps of the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignupStep {
    /// Step 1: create the auth account.
    Account,
    /// Step 2: normalise and upload the avatar.
    Upload,
    /// Step 3: persist the profile record.
    Persist,
}

impl SignupStep {
    /// First step of every submission.
    pub const FIRST: Self = Self::Account;

    /// The step that follows this one, if any.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Account => Some(Self::Upload),
            Self::Upload => Some(Self::Persist),
            Self::Persist => None,
        }
    }

    /// Stable name used in logs and error details.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Account => "account",
            Self::Upload => "upload",
            Self::Persist => "persist",
        }
    }
}

/// Failure taxonomy of the flow, one kind per step.
///
/// All kinds surface identically to the user; the tag exists so logs and
/// error details can say which remote call failed and whether external
/// state was left behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignupError {
    /// Step 1 failed: no account was created.
    #[error("account creation failed: {message}")]
    Auth { message: String },
    /// Step 2 failed: the account from step 1 exists without an avatar.
    #[error("avatar upload failed: {message}")]
    Upload { message: String },
    /// Step 3 failed: account and avatar exist without a profile.
    #[error("profile persistence failed: {message}")]
    Persist { message: String },
}

impl SignupError {
    /// Failure of the account-creation step.
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Failure of the avatar-upload step.
    pub fn upload(message: impl Into<String>) -> Self {
        Self::Upload {
            message: message.into(),
        }
    }

    /// Failure of the profile-persistence step.
    pub fn persist(message: impl Into<String>) -> Self {
        Self::Persist {
            message: message.into(),
        }
    }

    /// The step this failure belongs to.
    #[must_use]
    pub fn step(&self) -> SignupStep {
        match self {
            Self::Auth { .. } => SignupStep::Account,
            Self::Upload { .. } => SignupStep::Upload,
            Self::Persist { .. } => SignupStep::Persist,
        }
    }

    /// Whether earlier steps left external state behind.
    ///
    /// There are no compensating transactions: a failure after step 1
    /// strands an account (and after step 2 an avatar object) with no
    /// profile.
    #[must_use]
    pub fn leaves_orphaned_state(&self) -> bool {
        !matches!(self, Self::Auth { .. })
    }

    /// Message shown to the user, falling back to a generic one when the
    /// collaborator supplied nothing useful.
    #[must_use]
    pub fn user_message(&self) -> &str {
        let message = match self {
            Self::Auth { message } | Self::Upload { message } | Self::Persist { message } => {
                message.as_str()
            }
        };
        if message.trim().is_empty() {
            UNKNOWN_ERROR_MESSAGE
        } else {
            message
        }
    }
}

/// Outcome of a completed submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupReceipt {
    /// Identifier minted by the auth collaborator in step 1.
    pub account_id: AccountId,
    /// Avatar path derived from the account id.
    pub avatar: AvatarPath,
}

impl SignupReceipt {
    /// Route the client navigates to after success.
    #[must_use]
    pub fn redirect(&self) -> &'static str {
        routes::HOME
    }
}

/// Illegal state-machine transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("signup flow cannot {attempted} while {from}")]
pub struct SignupStateError {
    from: &'static str,
    attempted: &'static str,
}

/// Submission state machine.
///
/// ## Invariants
/// - Steps only ever advance in declaration order; there is no skipping
///   and no cancellation once submitting.
/// - `Failed` returns to `Submitting` only via a fresh [`begin`], which
///   re-runs all three steps from scratch.
///
/// [`begin`]: SignupState::begin
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupState {
    /// Form editable, no network activity.
    Idle,
    /// Inputs disabled, the tagged step's remote call is in flight.
    Submitting(SignupStep),
    /// Terminal: the client navigates home.
    Succeeded(SignupReceipt),
    /// Form editable again; the user may retry.
    Failed(SignupError),
}

impl Default for SignupState {
    fn default() -> Self {
        Self::Idle
    }
}

impl SignupState {
    fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting(_) => "submitting",
            Self::Succeeded(_) => "succeeded",
            Self::Failed(_) => "failed",
        }
    }

    fn illegal(&self, attempted: &'static str) -> SignupStateError {
        SignupStateError {
            from: self.name(),
            attempted,
        }
    }

    /// Whether the form accepts input in this state.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Idle | Self::Failed(_))
    }

    /// Start a submission. Legal from `Idle` and, as a retry, from
    /// `Failed`.
    pub fn begin(self) -> Result<Self, SignupStateError> {
        if self.is_editable() {
            Ok(Self::Submitting(SignupStep::FIRST))
        } else {
            Err(self.illegal("begin"))
        }
    }

    /// Move to the next step after the current one passed.
    pub fn advance(self) -> Result<Self, SignupStateError> {
        match self {
            Self::Submitting(step) => match step.next() {
                Some(next) => Ok(Self::Submitting(next)),
                None => Err(Self::Submitting(step).illegal("advance past the final step")),
            },
            other => Err(other.illegal("advance")),
        }
    }

    /// Finish successfully. Legal only while the final step is in flight.
    pub fn complete(self, receipt: SignupReceipt) -> Result<Self, SignupStateError> {
        match self {
            Self::Submitting(SignupStep::Persist) => Ok(Self::Succeeded(receipt)),
            other => Err(other.illegal("complete")),
        }
    }

    /// Record a failure of the in-flight step.
    pub fn fail(self, error: SignupError) -> Result<Self, SignupStateError> {
        match self {
            Self::Submitting(step) if step == error.step() => Ok(Self::Failed(error)),
            other => Err(other.illegal("fail")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn happy_path_walks_all_three_steps() {
        let state = SignupState::default();
        assert!(state.is_editable());

        let state = state.begin().expect("begin from idle");
        assert_eq!(state, SignupState::Submitting(SignupStep::Account));
        assert!(!state.is_editable());

        let state = state.advance().expect("account passed");
        assert_eq!(state, SignupState::Submitting(SignupStep::Upload));

        let state = state.advance().expect("upload passed");
        assert_eq!(state, SignupState::Submitting(SignupStep::Persist));

        let receipt = SignupReceipt {
            account_id: AccountId::random(),
            avatar: AvatarPath::for_account(&AccountId::random()),
        };
        let state = state.complete(receipt).expect("persist passed");
        assert!(matches!(state, SignupState::Succeeded(_)));
        assert!(!state.is_editable());
    }

    #[test]
    fn failure_returns_to_editable_and_allows_retry() {
        let state = SignupState::default().begin().expect("begin");
        let state = state.fail(SignupError::auth("rejected")).expect("fail");
        assert!(state.is_editable());
        let state = state.begin().expect("retry");
        assert_eq!(state, SignupState::Submitting(SignupStep::FIRST));
    }

    #[test]
    fn fail_requires_matching_step() {
        let state = SignupState::default().begin().expect("begin");
        let err = state
            .fail(SignupError::persist("out of order"))
            .expect_err("persist error while account step in flight");
        assert!(err.to_string().contains("cannot fail"));
    }

    #[rstest]
    #[case(SignupState::Idle)]
    #[case(SignupState::Failed(SignupError::upload("boom")))]
    fn advance_is_illegal_outside_submission(#[case] state: SignupState) {
        assert!(state.advance().is_err());
    }

    #[test]
    fn begin_is_illegal_mid_flight() {
        let state = SignupState::default().begin().expect("begin");
        assert!(state.begin().is_err());
    }

    #[rstest]
    #[case(SignupError::auth("taken"), SignupStep::Account, false)]
    #[case(SignupError::upload("denied"), SignupStep::Upload, true)]
    #[case(SignupError::persist("500"), SignupStep::Persist, true)]
    fn errors_tag_their_step_and_orphaning(
        #[case] error: SignupError,
        #[case] step: SignupStep,
        #[case] orphaned: bool,
    ) {
        assert_eq!(error.step(), step);
        assert_eq!(error.leaves_orphaned_state(), orphaned);
    }

    #[rstest]
    #[case(SignupError::auth(""), UNKNOWN_ERROR_MESSAGE)]
    #[case(SignupError::auth("   "), UNKNOWN_ERROR_MESSAGE)]
    #[case(SignupError::upload("bucket missing"), "bucket missing")]
    fn user_message_falls_back_when_blank(#[case] error: SignupError, #[case] expected: &str) {
        assert_eq!(error.user_message(), expected);
    }
}
