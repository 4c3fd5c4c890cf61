//! Header view-model endpoint.
//!
//! ```text
//! GET /api/v1/header?showAddPost=true
//! ```
//!
//! Resolves the current user from the session (if any) and returns the
//! navigation view. Absence of a user is not an error; the view carries a
//! placeholder badge instead.

use actix_web::{get, web};
use serde::Deserialize;
use tracing::warn;

use crate::domain::{CurrentUser, HeaderView};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Query parameters for the header endpoint.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct HeaderQuery {
    /// Enable the create-post affordance.
    #[serde(default)]
    pub show_add_post: bool,
}

/// Build the header navigation view for the current session.
#[utoipa::path(
    get,
    path = "/api/v1/header",
    params(HeaderQuery),
    responses(
        (status = 200, description = "Header view", body = HeaderView),
        (status = 500, description = "Internal server error", body = crate::domain::Error)
    ),
    tags = ["header"],
    operation_id = "header",
    security([])
)]
#[get("/header")]
pub async fn header(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<HeaderQuery>,
) -> ApiResult<web::Json<HeaderView>> {
    let user = resolve_current_user(&state, &session).await?;
    Ok(web::Json(HeaderView::build(
        query.show_add_post,
        user.as_ref(),
    )))
}

/// A failed lookup degrades to "no user yet"; the header never blocks on
/// the cache.
async fn resolve_current_user(
    state: &HttpState,
    session: &SessionContext,
) -> Result<Option<CurrentUser>, crate::domain::Error> {
    let Some(account_id) = session.account_id()? else {
        return Ok(None);
    };
    match state.current_user.current(&account_id).await {
        Ok(user) => Ok(user),
        Err(error) => {
            warn!(account_id = %account_id, error = %error, "current user lookup failed");
            Ok(None)
        }
    }
}
