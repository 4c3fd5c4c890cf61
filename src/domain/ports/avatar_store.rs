//! Driven port for the object-storage collaborator.

use async_trait::async_trait;

use crate::domain::{AvatarJpeg, AvatarPath};

use super::define_port_error;

define_port_error! {
    /// Errors raised by avatar store adapters.
    pub enum AvatarStoreError {
        /// Storage refused the object (permissions, duplicate key,
        /// bucket missing).
        Rejected { message: String } => "avatar store rejected upload: {message}",
        /// Storage could not be reached or answered garbage.
        Transport { message: String } => "avatar store transport failure: {message}",
    }
}

/// Port for uploading the normalised avatar.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AvatarStore: Send + Sync {
    /// Upload the avatar bytes at the derived path.
    async fn upload(&self, path: &AvatarPath, avatar: &AvatarJpeg)
        -> Result<(), AvatarStoreError>;
}

/// Fixture store that accepts every upload.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAvatarStore;

#[async_trait]
impl AvatarStore for FixtureAvatarStore {
    async fn upload(
        &self,
        _path: &AvatarPath,
        _avatar: &AvatarJpeg,
    ) -> Result<(), AvatarStoreError> {
        Ok(())
    }
}
