use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::{
    codegen::{CodeGenerator, RandomCodes},
    error::StoreError,
    models::Mapping,
};

/// How many candidate codes `shorten` draws before giving up.
pub const MAX_CODE_ATTEMPTS: usize = 10;

#[derive(Debug, Default)]
struct Mappings {
    /// short_code -> mapping
    forward: HashMap<String, Mapping>,
    /// original_url -> short_code
    reverse: HashMap<String, String>,
    /// Codes in insertion order, oldest first.
    order: Vec<String>,
}

/// In-memory store of short code <-> URL mappings.
///
/// Both directions live behind one `RwLock` and are only ever written together
/// while the write guard is held, so they stay mirror images of each other.
/// Lookups take the read lock and run concurrently; `shorten` holds the write
/// lock for its whole duration, including collision retries.
pub struct MappingStore {
    mappings: RwLock<Mappings>,
    generator: Box<dyn CodeGenerator>,
    max_attempts: usize,
}

impl MappingStore {
    pub fn new() -> Self {
        Self::with_generator(RandomCodes, MAX_CODE_ATTEMPTS)
    }

    pub fn with_generator(generator: impl CodeGenerator + 'static, max_attempts: usize) -> Self {
        Self {
            mappings: RwLock::new(Mappings::default()),
            generator: Box::new(generator),
            max_attempts,
        }
    }

    /// Return the code for an already-normalized URL, creating a mapping if
    /// the URL has not been seen before.
    ///
    /// Shortening the same URL twice yields the same code and a single
    /// mapping.
    pub async fn shorten(&self, original_url: &str) -> Result<String, StoreError> {
        let mut mappings = self.mappings.write().await;

        if let Some(code) = mappings.reverse.get(original_url) {
            return Ok(code.clone());
        }

        let code = self.free_code(&mappings.forward)?;

        mappings.forward.insert(
            code.clone(),
            Mapping {
                short_code: code.clone(),
                original_url: original_url.to_owned(),
                created_at: Utc::now(),
            },
        );
        mappings.reverse.insert(original_url.to_owned(), code.clone());
        mappings.order.push(code.clone());

        tracing::debug!("Created short code '{}' for {}", code, original_url);
        Ok(code)
    }

    /// Look up the URL behind a short code.
    pub async fn resolve(&self, short_code: &str) -> Result<String, StoreError> {
        let mappings = self.mappings.read().await;
        mappings
            .forward
            .get(short_code)
            .map(|m| m.original_url.clone())
            .ok_or_else(|| StoreError::NotFound(short_code.to_owned()))
    }

    /// Up to `limit` mappings, newest first.
    pub async fn list_recent(&self, limit: usize) -> Vec<Mapping> {
        let mappings = self.mappings.read().await;
        mappings
            .order
            .iter()
            .rev()
            .take(limit)
            .filter_map(|code| mappings.forward.get(code).cloned())
            .collect()
    }

    /// Number of stored mappings.
    pub async fn len(&self) -> usize {
        self.mappings.read().await.forward.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn free_code(&self, forward: &HashMap<String, Mapping>) -> Result<String, StoreError> {
        for attempt in 1..=self.max_attempts {
            let code = self.generator.generate()?;
            if !forward.contains_key(&code) {
                return Ok(code);
            }
            tracing::warn!("Short code collision on '{}' (attempt {})", code, attempt);
        }
        Err(StoreError::Exhausted(format!(
            "no free short code after {} attempts",
            self.max_attempts
        )))
    }
}

impl Default for MappingStore {
    fn default() -> Self {
        Self::new()
    }
}
