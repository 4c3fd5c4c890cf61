//! Reqwest-backed auth gateway adapter.
//!
//! This adapter owns transport details only: request serialisation, timeout
//! and HTTP error mapping, and decoding the provider's signup envelope into a
//! domain [`AccountId`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use crate::domain::ports::{AuthGateway, AuthGatewayError};
use crate::domain::{AccountId, SignupCredentials};

use super::status_message;

const SIGNUP_PATH: &str = "auth/v1/signup";

/// Auth gateway adapter that performs HTTP POST requests against one provider.
pub struct AuthHttpGateway {
    client: Client,
    base: Url,
}

impl AuthHttpGateway {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base })
    }

    fn signup_url(&self) -> Result<Url, AuthGatewayError> {
        self.base
            .join(SIGNUP_PATH)
            .map_err(|error| AuthGatewayError::transport(format!("invalid signup URL: {error}")))
    }
}

#[async_trait]
impl AuthGateway for AuthHttpGateway {
    async fn sign_up(
        &self,
        credentials: &SignupCredentials,
    ) -> Result<AccountId, AuthGatewayError> {
        let response = self
            .client
            .post(self.signup_url()?)
            .json(&serde_json::json!({
                "email": credentials.email().as_str(),
                "password": credentials.password(),
            }))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        parse_signup_response(status, body.as_ref())
    }
}

#[derive(Debug, Deserialize)]
struct SignupEnvelopeDto {
    user: Option<SignupUserDto>,
    error: Option<SignupErrorDto>,
}

#[derive(Debug, Deserialize)]
struct SignupUserDto {
    id: String,
}

#[derive(Debug, Deserialize)]
struct SignupErrorDto {
    message: Option<String>,
}

fn parse_signup_response(status: StatusCode, body: &[u8]) -> Result<AccountId, AuthGatewayError> {
    if !status.is_success() {
        return Err(map_status_error(status, body));
    }

    let decoded: SignupEnvelopeDto = serde_json::from_slice(body).map_err(|error| {
        AuthGatewayError::transport(format!("invalid signup response payload: {error}"))
    })?;

    if let Some(error) = decoded.error {
        let message = error
            .message
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| format!("status {}", status.as_u16()));
        return Err(AuthGatewayError::rejected(message));
    }

    let Some(user) = decoded.user else {
        return Err(AuthGatewayError::missing_identity());
    };
    AccountId::new(&user.id).map_err(|error| {
        AuthGatewayError::transport(format!("malformed account identifier: {error}"))
    })
}

fn map_transport_error(error: reqwest::Error) -> AuthGatewayError {
    AuthGatewayError::transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> AuthGatewayError {
    let message = status_message(status, body);
    if status.is_client_error() {
        AuthGatewayError::rejected(message)
    } else {
        AuthGatewayError::transport(message)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network signup envelope mapping.

    use super::*;
    use rstest::rstest;

    #[test]
    fn successful_envelope_yields_account_id() {
        let body = br#"{"user": {"id": "8f8b431e-54f8-4f0f-9e2a-1d2f1b9e6a01"}, "error": null}"#;
        let account = parse_signup_response(StatusCode::OK, body).expect("envelope should decode");
        assert_eq!(account.to_string(), "8f8b431e-54f8-4f0f-9e2a-1d2f1b9e6a01");
    }

    #[test]
    fn provider_error_field_maps_to_rejected() {
        let body = br#"{"user": null, "error": {"message": "User already registered"}}"#;
        let error = parse_signup_response(StatusCode::OK, body).expect_err("must fail");
        assert_eq!(
            error,
            AuthGatewayError::rejected("User already registered"),
        );
    }

    #[test]
    fn blank_provider_message_falls_back_to_status() {
        let body = br#"{"user": null, "error": {"message": "  "}}"#;
        let error = parse_signup_response(StatusCode::OK, body).expect_err("must fail");
        assert_eq!(error, AuthGatewayError::rejected("status 200"));
    }

    #[test]
    fn success_without_identity_maps_to_missing_identity() {
        let body = br#"{"user": null, "error": null}"#;
        let error = parse_signup_response(StatusCode::OK, body).expect_err("must fail");
        assert_eq!(error, AuthGatewayError::missing_identity());
    }

    #[test]
    fn undecodable_success_body_maps_to_transport() {
        let error =
            parse_signup_response(StatusCode::OK, b"not json").expect_err("must fail");
        assert!(matches!(error, AuthGatewayError::Transport { .. }));
    }

    #[rstest]
    #[case::unprocessable(StatusCode::UNPROCESSABLE_ENTITY, true)]
    #[case::bad_request(StatusCode::BAD_REQUEST, true)]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR, false)]
    #[case::bad_gateway(StatusCode::BAD_GATEWAY, false)]
    fn maps_http_statuses_to_expected_port_errors(
        #[case] status: StatusCode,
        #[case] expect_rejected: bool,
    ) {
        let error = parse_signup_response(status, b"{\"msg\":\"nope\"}").expect_err("must fail");
        if expect_rejected {
            assert!(
                matches!(error, AuthGatewayError::Rejected { .. }),
                "client statuses should map to Rejected",
            );
        } else {
            assert!(
                matches!(error, AuthGatewayError::Transport { .. }),
                "server statuses should map to Transport",
            );
        }
    }
}
