//! Driving port for the signup use-case.
//!
//! Inbound adapters call this to run the three-step orchestration without
//! knowing (or importing) the collaborators behind it, so handler tests
//! can substitute a test double instead of wiring real gateways.

use async_trait::async_trait;

use crate::domain::{SignupError, SignupForm, SignupReceipt};

/// Domain use-case port for submitting a signup.
#[async_trait]
pub trait SignupFlow: Send + Sync {
    /// Run the full submission and return a receipt or the failure that
    /// stopped it.
    async fn submit(&self, form: SignupForm) -> Result<SignupReceipt, SignupError>;
}

/// Fixture flow that succeeds with a random account.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSignupFlow;

#[async_trait]
impl SignupFlow for FixtureSignupFlow {
    async fn submit(&self, _form: SignupForm) -> Result<SignupReceipt, SignupError> {
        let account_id = crate::domain::AccountId::random();
        let avatar = crate::domain::AvatarPath::for_account(&account_id);
        Ok(SignupReceipt { account_id, avatar })
    }
}
