//! Server construction and middleware wiring.

mod config;

pub use config::{CollaboratorEndpoints, ServerConfig, SessionKeyError, Settings};

use std::sync::Arc;

use actix_session::{
    config::CookieContentSecurity, storage::CookieSessionStore, SessionMiddleware,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpServer};
use tracing::{info, warn};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::ports::{FixtureAuthGateway, FixtureAvatarStore, FixtureProfileRecords};
use crate::domain::SignupService;
use crate::inbound::http::header::header;
use crate::inbound::http::health::{live, ready, HealthState};
use crate::inbound::http::signup::signup;
use crate::inbound::http::state::HttpState;
use crate::middleware::Trace;
use crate::outbound::{AuthHttpGateway, AvatarStoreHttp, ProfileApiHttp};

/// Build the signup flow from configuration.
///
/// Uses the HTTP-backed collaborator adapters when all endpoints are
/// configured, otherwise falls back to fixture adapters so development and
/// tests run without external services.
///
/// # Errors
/// Returns [`std::io::Error`] when an outbound HTTP client cannot be built.
fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    let Some(endpoints) = &config.collaborators else {
        warn!("collaborator endpoints not configured; using fixture adapters");
        return Ok(HttpState::new(Arc::new(SignupService::new(
            Arc::new(FixtureAuthGateway),
            Arc::new(FixtureAvatarStore),
            Arc::new(FixtureProfileRecords),
        ))));
    };

    let auth = AuthHttpGateway::new(endpoints.auth.clone(), endpoints.timeout)
        .map_err(|e| std::io::Error::other(format!("auth client construction failed: {e}")))?;
    let storage = AvatarStoreHttp::new(endpoints.storage.clone(), endpoints.timeout)
        .map_err(|e| std::io::Error::other(format!("storage client construction failed: {e}")))?;
    let profiles = ProfileApiHttp::new(endpoints.profile_api.clone(), endpoints.timeout)
        .map_err(|e| std::io::Error::other(format!("profile client construction failed: {e}")))?;

    info!(
        auth = %endpoints.auth,
        storage = %endpoints.storage,
        profile_api = %endpoints.profile_api,
        "outbound collaborators configured"
    );
    Ok(HttpState::new(Arc::new(SignupService::new(
        Arc::new(auth),
        Arc::new(storage),
        Arc::new(profiles),
    ))))
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .build();

    let api = web::scope("/api/v1")
        .wrap(session)
        .service(signup)
        .service(header);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is initialised.
/// - `config`: pre-built [`ServerConfig`] containing session, binding, and collaborator settings.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when building outbound clients, binding the
/// socket, or starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(&config)?);
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        collaborators: _,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
