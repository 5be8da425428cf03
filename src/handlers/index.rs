use crate::{
    error::AppError, handlers::RECENT_LINKS, models::Mapping, normalize::normalize_url, AppState,
};
use askama::Template;
use axum::{
    extract::{rejection::FormRejection, Form, Host, State},
    response::Html,
};
use serde::Deserialize;
use std::sync::Arc;

// ── Template ───────────────────────────────────────────────────────────────

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    short_url: Option<String>,
    links: Vec<Mapping>,
}

#[derive(Deserialize)]
pub struct ShortenForm {
    #[serde(default)]
    url: String,
}

// ── Handlers ───────────────────────────────────────────────────────────────

/// GET /
pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    render(&state, None).await
}

/// POST /shorten
///
/// Normalizes the submitted `url` field, stores it (or reuses the existing
/// code for a URL already seen) and renders the index page with the new
/// short link filled in.
pub async fn shorten(
    State(state): State<Arc<AppState>>,
    Host(host): Host,
    form: Result<Form<ShortenForm>, FormRejection>,
) -> Result<Html<String>, AppError> {
    let Form(form) = form.map_err(|e| {
        tracing::debug!("Rejected shorten form: {}", e);
        AppError::BadRequest("Bad request")
    })?;

    let url = normalize_url(&form.url)?;
    let code = state.store.shorten(&url).await?;
    tracing::info!("Shortened {} -> {}", url, code);

    render(&state, Some(format!("http://{host}/{code}"))).await
}

async fn render(state: &AppState, short_url: Option<String>) -> Result<Html<String>, AppError> {
    let links = state.store.list_recent(RECENT_LINKS).await;
    let html = IndexTemplate { short_url, links }.render()?;
    Ok(Html(html))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn template_escapes_stored_urls() {
        let html = IndexTemplate {
            short_url: Some("http://localhost:8080/abc123".into()),
            links: vec![Mapping {
                short_code: "abc123".into(),
                original_url: "http://example.com/?a=<b>".into(),
                created_at: Utc::now(),
            }],
        }
        .render()
        .unwrap()
        .replace("&#x2f;", "/");

        assert!(html.contains("http://localhost:8080/abc123"));
        assert!(html.contains("href=\"/abc123\""));
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;b&gt;"));
    }

    #[test]
    fn template_without_links() {
        let html = IndexTemplate {
            short_url: None,
            links: Vec::new(),
        }
        .render()
        .unwrap();

        assert!(html.contains("No links yet"));
        assert!(!html.contains("Your short URL"));
    }
}
