//! Outbound adapters implementing the domain ports over real transports.

pub mod auth_http;
pub mod current_user_cache;
pub mod profile_api_http;
pub mod storage_http;

pub use auth_http::AuthHttpGateway;
pub use current_user_cache::InMemoryCurrentUserCache;
pub use profile_api_http::ProfileApiHttp;
pub use storage_http::AvatarStoreHttp;

/// Compact, length-capped rendering of an upstream response body for error
/// messages and logs.
pub(crate) fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

/// `"status N"` or `"status N: preview"` depending on whether the body said
/// anything.
pub(crate) fn status_message(status: reqwest::StatusCode, body: &[u8]) -> String {
    let preview = body_preview(body);
    if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {preview}", status.as_u16())
    }
}
