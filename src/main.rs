//! Backend entry-point: loads settings, wires the HTTP server, and runs it.

use actix_web::cookie::SameSite;
use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use photofeed::inbound::http::health::HealthState;
use photofeed::server::{create_server, ServerConfig, Settings};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = Settings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("configuration failed to load: {e}")))?;

    let key = settings.session_key().map_err(std::io::Error::other)?;
    let bind_addr = settings.bind_addr().parse().map_err(|e| {
        std::io::Error::other(format!("invalid bind address {:?}: {e}", settings.bind_addr()))
    })?;

    let config = ServerConfig::new(key, settings.cookie_secure, SameSite::Lax, bind_addr)
        .with_collaborators(settings.collaborators());

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}
