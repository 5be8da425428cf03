use crate::{codegen::is_valid_code, error::AppError, error::StoreError, AppState};
use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use url::Url;

/// GET /:code
///
/// 302 to the stored URL, 404 when the code is unknown. Paths that cannot be
/// a generated code are answered without touching the store.
pub async fn redirect(State(state): State<Arc<AppState>>, Path(code): Path<String>) -> Response {
    if !is_valid_code(&code) {
        return AppError::from(StoreError::NotFound(code)).into_response();
    }

    let original_url = match state.store.resolve(&code).await {
        Ok(url) => url,
        Err(e) => return AppError::from(e).into_response(),
    };

    match location(&original_url) {
        Some(value) => (StatusCode::FOUND, [(header::LOCATION, value)]).into_response(),
        None => {
            tracing::error!(
                "Stored URL for '{}' cannot be sent as a Location header: {:?}",
                code,
                original_url
            );
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
        }
    }
}

/// The stored URL as a header value. URLs holding spaces or non-ASCII text are
/// sent in the parser's percent-encoded form instead.
fn location(url: &str) -> Option<HeaderValue> {
    if url.bytes().all(|b| b.is_ascii_graphic()) {
        return HeaderValue::from_str(url).ok();
    }
    let parsed = Url::parse(url).ok()?;
    HeaderValue::from_str(parsed.as_str()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_urls_are_sent_verbatim() {
        assert_eq!(location("http://foo.com").unwrap(), "http://foo.com");
        assert_eq!(
            location("https://example.com/a?b=c#d").unwrap(),
            "https://example.com/a?b=c#d"
        );
    }

    #[test]
    fn non_ascii_urls_are_percent_encoded() {
        assert_eq!(
            location("http://example.com/a b").unwrap(),
            "http://example.com/a%20b"
        );
        assert_eq!(
            location("http://münchen.de/").unwrap(),
            "http://xn--mnchen-3ya.de/"
        );
    }
}
