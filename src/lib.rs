//! Photofeed backend library modules.
//!
//! A backend-for-frontend for a photo-sharing app: the three-step signup
//! flow (account, avatar upload, profile row) and the header view model,
//! exposed over a session-authenticated REST API.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Trace-correlation middleware applied to every request.
pub use middleware::Trace;
