//! Driven port for the authentication collaborator.
//!
//! The flow only ever asks the auth provider for one thing: create an
//! account for an email/password pair and hand back its identifier. The
//! provider owns the account; no rollback operation is exposed.

use async_trait::async_trait;

use crate::domain::{AccountId, SignupCredentials};

use super::define_port_error;

define_port_error! {
    /// Errors raised by auth gateway adapters.
    pub enum AuthGatewayError {
        /// The provider refused the signup (duplicate email, weak
        /// password, policy failure).
        Rejected { message: String } => "auth provider rejected signup: {message}",
        /// The provider answered success but returned no account
        /// identifier.
        MissingIdentity => "auth provider returned no account identifier",
        /// The provider could not be reached or answered garbage.
        Transport { message: String } => "auth provider transport failure: {message}",
    }
}

/// Port for creating accounts with the auth collaborator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Create an account and return its identifier.
    async fn sign_up(&self, credentials: &SignupCredentials)
        -> Result<AccountId, AuthGatewayError>;
}

/// Fixture gateway that mints a random account id for every signup.
///
/// Used in development wiring when no auth provider URL is configured,
/// and in tests that do not exercise auth failures.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAuthGateway;

#[async_trait]
impl AuthGateway for FixtureAuthGateway {
    async fn sign_up(
        &self,
        _credentials: &SignupCredentials,
    ) -> Result<AccountId, AuthGatewayError> {
        Ok(AccountId::random())
    }
}
