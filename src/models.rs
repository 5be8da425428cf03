use chrono::{DateTime, Utc};

/// A stored short code together with the URL it redirects to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
}
