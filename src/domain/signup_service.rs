//! Signup orchestration service.
//!
//! Implements the [`SignupFlow`] driving port: three collaborator calls
//! awaited in strict sequence, each returning a step-tagged result, with
//! short-circuiting on the first failure. There are no compensating
//! transactions; failures after step 1 are logged with the stranded
//! account id so the gap is visible to operators.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{
    AuthGateway, AuthGatewayError, AvatarStore, AvatarStoreError, ProfileRecords,
    ProfileRecordsError, SignupFlow,
};
use crate::domain::{
    AccountId, AvatarJpeg, AvatarPath, NewProfile, SignupError, SignupForm, SignupReceipt,
    SignupState, SignupStep,
};

fn map_auth_error(error: AuthGatewayError) -> SignupError {
    match error {
        AuthGatewayError::Rejected { message } => SignupError::auth(message),
        other @ (AuthGatewayError::MissingIdentity | AuthGatewayError::Transport { .. }) => {
            SignupError::auth(other.to_string())
        }
    }
}

fn map_store_error(error: AvatarStoreError) -> SignupError {
    match error {
        AvatarStoreError::Rejected { message } => SignupError::upload(message),
        other @ AvatarStoreError::Transport { .. } => SignupError::upload(other.to_string()),
    }
}

fn map_records_error(error: ProfileRecordsError) -> SignupError {
    match error {
        ProfileRecordsError::Rejected { message } => SignupError::persist(message),
        other @ ProfileRecordsError::Transport { .. } => SignupError::persist(other.to_string()),
    }
}

/// Orchestrates account creation, avatar upload, and profile persistence.
pub struct SignupService<A, S, P> {
    auth: Arc<A>,
    avatars: Arc<S>,
    profiles: Arc<P>,
}

impl<A, S, P> SignupService<A, S, P> {
    /// Create a service over the three collaborator ports.
    pub fn new(auth: Arc<A>, avatars: Arc<S>, profiles: Arc<P>) -> Self {
        Self {
            auth,
            avatars,
            profiles,
        }
    }
}

impl<A, S, P> SignupService<A, S, P>
where
    A: AuthGateway,
    S: AvatarStore,
    P: ProfileRecords,
{
    /// Run the submission and return the terminal flow state.
    ///
    /// Convenience over [`SignupFlow::submit`] for callers that track the
    /// form lifecycle rather than a plain result.
    pub async fn run(&self, form: SignupForm) -> SignupState {
        match self.submit_inner(form).await {
            Ok(receipt) => SignupState::Succeeded(receipt),
            Err(error) => SignupState::Failed(error),
        }
    }

    async fn submit_inner(&self, form: SignupForm) -> Result<SignupReceipt, SignupError> {
        // Step 1: the account must exist before anything else happens.
        debug!(step = SignupStep::Account.as_str(), "signup step started");
        let account_id = self
            .auth
            .sign_up(form.credentials())
            .await
            .map_err(map_auth_error)?;

        // Step 2: normalise locally, then upload under the account prefix.
        debug!(step = SignupStep::Upload.as_str(), account_id = %account_id, "signup step started");
        let avatar_path = self
            .upload_avatar(&account_id, form.photo())
            .await
            .inspect_err(|error| log_orphaned(error, &account_id))?;

        // Step 3: only now may the profile reference account and avatar.
        debug!(step = SignupStep::Persist.as_str(), account_id = %account_id, "signup step started");
        let profile = NewProfile::new(
            form.credentials().email().clone(),
            avatar_path.clone(),
            form.first_name(),
            form.last_name(),
            form.username().clone(),
        );
        self.profiles
            .create(&profile)
            .await
            .map_err(map_records_error)
            .inspect_err(|error| log_orphaned(error, &account_id))?;

        Ok(SignupReceipt {
            account_id,
            avatar: avatar_path,
        })
    }

    async fn upload_avatar(
        &self,
        account_id: &AccountId,
        photo: &[u8],
    ) -> Result<AvatarPath, SignupError> {
        let avatar = AvatarJpeg::normalize(photo)
            .map_err(|error| SignupError::upload(error.to_string()))?;
        let path = AvatarPath::for_account(account_id);
        self.avatars
            .upload(&path, &avatar)
            .await
            .map_err(map_store_error)?;
        Ok(path)
    }
}

fn log_orphaned(error: &SignupError, account_id: &AccountId) {
    if error.leaves_orphaned_state() {
        warn!(
            account_id = %account_id,
            step = error.step().as_str(),
            "signup failed after account creation; orphaned external state remains"
        );
    }
}

#[async_trait]
impl<A, S, P> SignupFlow for SignupService<A, S, P>
where
    A: AuthGateway,
    S: AvatarStore,
    P: ProfileRecords,
{
    async fn submit(&self, form: SignupForm) -> Result<SignupReceipt, SignupError> {
        self.submit_inner(form).await
    }
}

#[cfg(test)]
#[path = "signup_service_tests.rs"]
mod tests;
