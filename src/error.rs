use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Failures surfaced by URL normalization and the mapping store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The submitted URL was empty or could not be parsed.
    #[error("{0}")]
    Validation(String),

    /// No mapping exists for the requested short code.
    #[error("short code '{0}' not found")]
    NotFound(String),

    /// No free short code could be produced.
    #[error("failed to generate short code: {0}")]
    Exhausted(String),
}

// ── HTTP-facing error ──────────────────────────────────────────────────────

/// Error returned by request handlers. Bodies are plain text, like the rest
/// of the non-HTML responses.
#[derive(Debug)]
pub enum AppError {
    Store(StoreError),
    /// The index template failed to render. The details are logged, never
    /// sent to the client.
    Render(askama::Error),
    BadRequest(&'static str),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl From<askama::Error> for AppError {
    fn from(err: askama::Error) -> Self {
        Self::Render(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Store(err @ StoreError::Validation(_)) => {
                (StatusCode::BAD_REQUEST, err.to_string()).into_response()
            }
            AppError::Store(StoreError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "Short link not found").into_response()
            }
            AppError::Store(err @ StoreError::Exhausted(_)) => {
                tracing::error!("Short code generation failed: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
            }
            AppError::Render(e) => {
                tracing::error!("Template error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_kind() {
        let cases = [
            (AppError::from(StoreError::Validation("URL is required".into())), 400),
            (AppError::from(StoreError::NotFound("abcdef".into())), 404),
            (AppError::from(StoreError::Exhausted("no free code".into())), 500),
            (AppError::BadRequest("Bad request"), 400),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status().as_u16(), status);
        }
    }

    #[test]
    fn validation_message_is_passed_through() {
        let err = StoreError::Validation("invalid URL: empty host".into());
        assert_eq!(err.to_string(), "invalid URL: empty host");
    }
}
