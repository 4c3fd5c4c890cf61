//! In-memory current-user cache.
//!
//! Stands in for the client-side data-fetching cache the original design
//! delegated current-user reads to. The signup handler primes it on
//! success so the header resolves the new user without a collaborator
//! round-trip.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{CurrentUserQuery, CurrentUserQueryError};
use crate::domain::{AccountId, CurrentUser};

/// Process-local map from account id to the current-user projection.
#[derive(Debug, Default)]
pub struct InMemoryCurrentUserCache {
    entries: RwLock<HashMap<AccountId, CurrentUser>>,
}

impl InMemoryCurrentUserCache {
    /// Insert or replace the projection for an account.
    pub fn prime(&self, account_id: AccountId, user: CurrentUser) {
        match self.entries.write() {
            Ok(mut entries) => {
                entries.insert(account_id, user);
            }
            Err(poisoned) => {
                // A panicking writer cannot corrupt a HashMap insert;
                // recover rather than wedge every later signup.
                poisoned.into_inner().insert(account_id, user);
            }
        }
    }
}

#[async_trait]
impl CurrentUserQuery for InMemoryCurrentUserCache {
    async fn current(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<CurrentUser>, CurrentUserQueryError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| CurrentUserQueryError::lookup("cache lock poisoned"))?;
        Ok(entries.get(account_id).cloned())
    }
}
