//! Reqwest-backed profile records adapter.
//!
//! Persists the signup profile row by POSTing a JSON document to the data
//! API's user endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;

use crate::domain::ports::{ProfileRecords, ProfileRecordsError};
use crate::domain::NewProfile;

use super::status_message;

const USER_PATH: &str = "api/user";

/// Profile records adapter targeting the data API over HTTP.
pub struct ProfileApiHttp {
    client: Client,
    base: Url,
}

impl ProfileApiHttp {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base })
    }

    fn user_url(&self) -> Result<Url, ProfileRecordsError> {
        self.base
            .join(USER_PATH)
            .map_err(|error| ProfileRecordsError::transport(format!("invalid user URL: {error}")))
    }
}

#[async_trait]
impl ProfileRecords for ProfileApiHttp {
    async fn create(&self, profile: &NewProfile) -> Result<(), ProfileRecordsError> {
        let response = self
            .client
            .post(self.user_url()?)
            .json(&NewProfileDto::from(profile))
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

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewProfileDto<'a> {
    email: &'a str,
    profile_picture: &'a str,
    first_name: &'a str,
    last_name: &'a str,
    username: &'a str,
}

impl<'a> From<&'a NewProfile> for NewProfileDto<'a> {
    fn from(profile: &'a NewProfile) -> Self {
        Self {
            email: profile.email().as_str(),
            profile_picture: profile.avatar().as_str(),
            first_name: profile.first_name(),
            last_name: profile.last_name(),
            username: profile.username().as_str(),
        }
    }
}

fn map_transport_error(error: reqwest::Error) -> ProfileRecordsError {
    ProfileRecordsError::transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ProfileRecordsError {
    let message = status_message(status, body);
    if status.is_client_error() {
        ProfileRecordsError::rejected(message)
    } else {
        ProfileRecordsError::transport(message)
    }
}
