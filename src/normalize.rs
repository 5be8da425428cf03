//! Validation of submitted URLs before they reach the store.
//!
//! Normalization is deliberately shallow: surrounding whitespace is trimmed and
//! `http://` is prepended when the input carries no scheme. The result is the
//! submitted text itself rather than the parser's re-serialization, so
//! `example.com` becomes `http://example.com` (no trailing slash is added).

use url::{ParseError, Url};

use crate::error::StoreError;

/// Trim, default the scheme to `http://`, and check that the result parses.
///
/// # Errors
///
/// Returns [`StoreError::Validation`] when the trimmed input is empty or
/// does not parse as a URL, with or without the default scheme. Inputs like
/// `http://` (empty host) are rejected because the parser rejects them.
pub fn normalize_url(raw: &str) -> Result<String, StoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(StoreError::Validation("URL is required".into()));
    }

    match Url::parse(trimmed) {
        Ok(_) => Ok(trimmed.to_owned()),
        Err(ParseError::RelativeUrlWithoutBase) => {
            let with_scheme = format!("http://{trimmed}");
            Url::parse(&with_scheme).map_err(invalid)?;
            Ok(with_scheme)
        }
        Err(e) => Err(invalid(e)),
    }
}

fn invalid(e: ParseError) -> StoreError {
    StoreError::Validation(format!("invalid URL: {e}"))
}
