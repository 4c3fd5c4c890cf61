//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Thin wrapper around Actix sessions so handlers only deal with
//! domain-friendly operations: persisting or reading the signed-in account
//! id.

use actix_session::Session;
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;

use crate::domain::{AccountId, Error};

pub(crate) const ACCOUNT_ID_KEY: &str = "account_id";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the signed-in account id in the session cookie.
    pub fn persist_account(&self, account_id: &AccountId) -> Result<(), Error> {
        self.0
            .insert(ACCOUNT_ID_KEY, account_id.as_ref())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the signed-in account id from the session, if present.
    ///
    /// A malformed cookie value is treated as no session rather than an
    /// error; the header degrades to a placeholder either way.
    pub fn account_id(&self) -> Result<Option<AccountId>, Error> {
        let raw = self
            .0
            .get::<String>(ACCOUNT_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        match raw {
            Some(value) => match AccountId::new(value) {
                Ok(id) => Ok(Some(id)),
                Err(error) => {
                    tracing::warn!("invalid account id in session cookie: {error}");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App, HttpResponse};

    #[actix_web::test]
    async fn round_trips_account_id() {
        let app = test::init_service(
            App::new()
                .wrap(crate::inbound::http::test_utils::test_session_middleware())
                .route(
                    "/set",
                    web::get().to(|session: SessionContext| async move {
                        let id = AccountId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6")
                            .expect("fixture id");
                        session.persist_account(&id)?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/get",
                    web::get().to(|session: SessionContext| async move {
                        let id = session.account_id()?;
                        Ok::<_, Error>(match id {
                            Some(id) => HttpResponse::Ok().body(id.to_string()),
                            None => HttpResponse::NoContent().finish(),
                        })
                    }),
                ),
        )
        .await;

        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        assert_eq!(set_res.status(), StatusCode::OK);
        let cookie = set_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set");

        let get_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/get")
                .cookie(cookie.into_owned())
                .to_request(),
        )
        .await;
        assert_eq!(get_res.status(), StatusCode::OK);
        let body = test::read_body(get_res).await;
        assert_eq!(body.as_ref(), b"3fa85f64-5717-4562-b3fc-2c963f66afa6");
    }

    #[actix_web::test]
    async fn missing_session_reads_as_none() {
        let app = test::init_service(
            App::new()
                .wrap(crate::inbound::http::test_utils::test_session_middleware())
                .route(
                    "/get",
                    web::get().to(|session: SessionContext| async move {
                        let id = session.account_id()?;
                        Ok::<_, Error>(match id {
                            Some(id) => HttpResponse::Ok().body(id.to_string()),
                            None => HttpResponse::NoContent().finish(),
                        })
                    }),
                ),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/get").to_request()).await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }
}
