//! HTTP client for the published search index.
//!
//! The index is a single JSON artifact (`{ "pages": [...] }`) generated at
//! site build time; this client fetches and parses it once per engine
//! instance.

use std::time::Duration;

use crate::error::LoadError;
use crate::types::SearchIndex;

/// Fetches the search index artifact from a site.
#[derive(Debug, Clone)]
pub struct IndexClient {
    base_url: String,
    timeout: Duration,
    http: reqwest::Client,
}

impl IndexClient {
    /// Create a client for the given site base URL.
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            base_url,
            timeout,
            http: reqwest::Client::new(),
        }
    }

    /// Fetch and parse the index at `path` (e.g. `/search-index.json`).
    ///
    /// The body is read as text and parsed separately so transport failures
    /// and malformed payloads surface as distinct causes.
    pub async fn fetch_index(&self, path: &str) -> Result<SearchIndex, LoadError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .http
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|source| LoadError::Fetch {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|source| LoadError::Fetch {
            url: url.clone(),
            source,
        })?;

        serde_json::from_str(&body).map_err(|source| LoadError::Parse { url, source })
    }

    /// Base URL this client fetches from (for display/logging).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
