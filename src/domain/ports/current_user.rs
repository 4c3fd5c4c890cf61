//! Read-only port resolving the current user for the header.
//!
//! The header treats absence as normal: an unresolved user renders a
//! placeholder, never an error page.

use async_trait::async_trait;

use crate::domain::{AccountId, CurrentUser};

use super::define_port_error;

define_port_error! {
    /// Errors raised by current-user adapters.
    pub enum CurrentUserQueryError {
        /// The backing cache or store failed.
        Lookup { message: String } => "current user lookup failed: {message}",
    }
}

/// Port for reading the current-user projection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CurrentUserQuery: Send + Sync {
    /// Resolve the projection for an account, if known.
    async fn current(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<CurrentUser>, CurrentUserQueryError>;
}

/// Fixture query that never resolves a user.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCurrentUserQuery;

#[async_trait]
impl CurrentUserQuery for FixtureCurrentUserQuery {
    async fn current(
        &self,
        _account_id: &AccountId,
    ) -> Result<Option<CurrentUser>, CurrentUserQueryError> {
        Ok(None)
    }
}
