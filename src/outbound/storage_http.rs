//! Reqwest-backed avatar store adapter.
//!
//! Uploads normalised avatar JPEGs to the storage collaborator's object
//! endpoint under the `avatars` bucket.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode, Url};

use crate::domain::ports::{AvatarStore, AvatarStoreError};
use crate::domain::{AvatarJpeg, AvatarPath};

use super::status_message;

const OBJECT_PATH_PREFIX: &str = "storage/v1/object/avatars/";

/// Avatar store adapter that performs HTTP POST uploads against one endpoint.
pub struct AvatarStoreHttp {
    client: Client,
    base: Url,
}

impl AvatarStoreHttp {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base })
    }

    fn object_url(&self, path: &AvatarPath) -> Result<Url, AvatarStoreError> {
        self.base
            .join(&format!("{OBJECT_PATH_PREFIX}{path}"))
            .map_err(|error| AvatarStoreError::transport(format!("invalid object URL: {error}")))
    }
}

#[async_trait]
impl AvatarStore for AvatarStoreHttp {
    async fn upload(&self, path: &AvatarPath, avatar: &AvatarJpeg) -> Result<(), AvatarStoreError> {
        let response = self
            .client
            .post(self.object_url(path)?)
            .header(header::CONTENT_TYPE, "image/jpeg")
            .body(avatar.as_bytes().to_vec())
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.bytes().await.map_err(map_transport_error)?;
        Err(map_status_error(status, body.as_ref()))
    }
}

fn map_transport_error(error: reqwest::Error) -> AvatarStoreError {
    AvatarStoreError::transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> AvatarStoreError {
    let message = status_message(status, body);
    if status.is_client_error() {
        AvatarStoreError::rejected(message)
    } else {
        AvatarStoreError::transport(message)
    }
}
