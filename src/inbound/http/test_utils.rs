//! Test helpers for inbound HTTP components.

use actix_session::{
    config::CookieContentSecurity, storage::CookieSessionStore, SessionMiddleware,
};
use actix_web::cookie::{Key, SameSite};

/// Build a session middleware matching the server's cookie settings.
///
/// Uses the same cookie name, `HttpOnly`, private content security, and
/// `SameSite` policy as production wiring, with a fresh key per invocation
/// and the `Secure` flag disabled for local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .build()
}
