//! Signup API handler.
//!
//! ```text
//! POST /api/v1/signup
//! {"email":"ada@example.com","password":"...","firstName":"Ada",
//!  "lastName":"Lovelace","username":"ada","profilePicture":"<base64>"}
//! ```
//!
//! Success answers `303 See Other` with `Location: /` (the HTTP shape of
//! "navigate home") and signs the new account into the session.

use actix_web::http::header;
use actix_web::{post, web, HttpResponse};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{
    CredentialsValidationError, CurrentUser, Error, ProfileValidationError, SignupCredentials,
    SignupError, SignupForm, Username,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Signup request body for `POST /api/v1/signup`.
///
/// The profile picture travels as base64-encoded image bytes; the flow
/// normalises it to a 300×300 JPEG before upload.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub profile_picture: String,
}

fn field_error(message: impl Into<String>, field: &str, code: &str) -> Error {
    Error::invalid_request(message).with_details(json!({ "field": field, "code": code }))
}

fn map_credentials_error(err: CredentialsValidationError) -> Error {
    match err {
        CredentialsValidationError::EmptyEmail => {
            field_error("email must not be empty", "email", "empty_email")
        }
        CredentialsValidationError::InvalidEmail => field_error(
            "email must contain a local part and a domain",
            "email",
            "invalid_email",
        ),
        CredentialsValidationError::EmptyPassword => {
            field_error("password must not be empty", "password", "empty_password")
        }
    }
}

fn map_username_error(err: ProfileValidationError) -> Error {
    let code = match err {
        ProfileValidationError::EmptyUsername => "empty_username",
        ProfileValidationError::UsernameTooShort { .. } => "too_short",
        ProfileValidationError::UsernameTooLong { .. } => "too_long",
        ProfileValidationError::UsernameInvalidCharacters => "invalid_chars",
        // Account id variants never come out of Username::new.
        ProfileValidationError::EmptyAccountId | ProfileValidationError::InvalidAccountId => {
            "invalid"
        }
    };
    field_error(err.to_string(), "username", code)
}

fn build_form(request: SignupRequest) -> Result<SignupForm, Error> {
    let credentials = SignupCredentials::try_from_parts(&request.email, &request.password)
        .map_err(map_credentials_error)?;
    let username = Username::new(request.username).map_err(map_username_error)?;
    let photo = BASE64.decode(request.profile_picture.as_bytes()).map_err(|_| {
        field_error(
            "profile picture must be base64-encoded image bytes",
            "profilePicture",
            "invalid_base64",
        )
    })?;
    Ok(SignupForm::new(
        credentials,
        request.first_name,
        request.last_name,
        username,
        photo,
    ))
}

fn map_signup_error(error: &SignupError) -> Error {
    Error::upstream(error.user_message().to_owned()).with_details(json!({
        "step": error.step().as_str(),
        "orphaned": error.leaves_orphaned_state(),
    }))
}

/// Run the three-step signup flow and sign the new account in.
#[utoipa::path(
    post,
    path = "/api/v1/signup",
    request_body = SignupRequest,
    responses(
        (status = 303, description = "Signup succeeded; Location points home",
            headers(("Location" = String, description = "Post-signup route"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 502, description = "A collaborator failed", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["signup"],
    operation_id = "signup",
    security([])
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let form = build_form(payload.into_inner())?;
    let username = form.username().clone();
    let first_name = form.first_name().to_owned();
    let last_name = form.last_name().to_owned();

    let receipt = state
        .signup
        .submit(form)
        .await
        .map_err(|error| map_signup_error(&error))?;

    session.persist_account(&receipt.account_id)?;
    state.user_cache.prime(
        receipt.account_id.clone(),
        CurrentUser {
            username,
            first_name,
            last_name,
            profile_picture: receipt.avatar.clone(),
        },
    );

    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, receipt.redirect()))
        .finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use async_trait::async_trait;
    use image::{DynamicImage, ImageOutputFormat, RgbImage};
    use serde_json::Value;

    use crate::domain::ports::{FixtureSignupFlow, SignupFlow};
    use crate::domain::SignupReceipt;

    struct FailingFlow(SignupError);

    #[async_trait]
    impl SignupFlow for FailingFlow {
        async fn submit(&self, _form: SignupForm) -> Result<SignupReceipt, SignupError> {
            Err(self.0.clone())
        }
    }

    fn photo_base64() -> String {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, image::Rgb([1, 2, 3])));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
            .expect("encode test photo");
        BASE64.encode(bytes)
    }

    fn request_body() -> SignupRequest {
        SignupRequest {
            email: "ada@example.com".to_owned(),
            password: "hunter2".to_owned(),
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            username: "ada".to_owned(),
            profile_picture: photo_base64(),
        }
    }

    fn test_app(
        flow: Arc<dyn SignupFlow>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(HttpState::new(flow)))
            .wrap(crate::inbound::http::test_utils::test_session_middleware())
            .service(web::scope("/api/v1").service(signup))
    }

    #[actix_web::test]
    async fn success_redirects_home_and_sets_session() {
        let app = test::init_service(test_app(Arc::new(FixtureSignupFlow))).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/signup")
                .set_json(request_body())
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            res.headers().get(header::LOCATION).map(|v| v.as_bytes()),
            Some(b"/".as_ref())
        );
        assert!(
            res.response()
                .cookies()
                .any(|cookie| cookie.name() == "session"),
            "signup should establish a session"
        );
    }

    #[actix_web::test]
    async fn invalid_email_is_rejected_with_field_details() {
        let app = test::init_service(test_app(Arc::new(FixtureSignupFlow))).await;
        let mut body = request_body();
        body.email = "not-an-email".to_owned();
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/signup")
                .set_json(body)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let value: Value = test::read_body_json(res).await;
        assert_eq!(value["details"]["field"], "email");
        assert_eq!(value["details"]["code"], "invalid_email");
    }

    #[actix_web::test]
    async fn malformed_photo_encoding_is_rejected() {
        let app = test::init_service(test_app(Arc::new(FixtureSignupFlow))).await;
        let mut body = request_body();
        body.profile_picture = "&&& definitely not base64 &&&".to_owned();
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/signup")
                .set_json(body)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let value: Value = test::read_body_json(res).await;
        assert_eq!(value["details"]["field"], "profilePicture");
    }

    #[actix_web::test]
    async fn flow_failure_surfaces_step_and_orphaning() {
        let app = test::init_service(test_app(Arc::new(FailingFlow(SignupError::upload(
            "bucket missing",
        )))))
        .await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/signup")
                .set_json(request_body())
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
        let value: Value = test::read_body_json(res).await;
        assert_eq!(value["message"], "bucket missing");
        assert_eq!(value["details"]["step"], "upload");
        assert_eq!(value["details"]["orphaned"], true);
    }

    #[actix_web::test]
    async fn blank_collaborator_message_falls_back_to_generic_text() {
        let app =
            test::init_service(test_app(Arc::new(FailingFlow(SignupError::auth(""))))).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/signup")
                .set_json(request_body())
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
        let value: Value = test::read_body_json(res).await;
        assert_eq!(value["message"], crate::domain::UNKNOWN_ERROR_MESSAGE);
        assert_eq!(value["details"]["orphaned"], false);
    }
}
