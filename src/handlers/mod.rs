use axum::http::StatusCode;

pub mod index;
pub mod redirect;

/// How many stored mappings the index page lists.
pub const RECENT_LINKS: usize = 10;

/// HEAD on the GET-only routes. Without it axum's `get` answers HEAD with the
/// GET handler.
pub async fn method_not_allowed() -> StatusCode {
    StatusCode::METHOD_NOT_ALLOWED
}
