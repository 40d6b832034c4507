//! Web search client for item enrichment
//!
//! This module defines the SearchClient trait the enrichment loop works
//! against, plus the Google Custom Search JSON API implementation. The
//! trait seam is what lets tests drive enrichment with canned results.

use crate::config::SearchConfig;
use crate::error::{Result, ToplistError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default API base for the Custom Search JSON API
const DEFAULT_API_BASE: &str = "https://customsearch.googleapis.com";

/// Which index a search runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    /// General web results
    Web,
    /// Image results (`searchType=image`)
    Image,
}

/// A single search result
///
/// Only `link` is load-bearing for enrichment; title and snippet are
/// retained for logging and debugging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// URL of the result (the image URL for image searches)
    pub link: String,
    /// Result title
    #[serde(default)]
    pub title: String,
    /// Result snippet
    #[serde(default)]
    pub snippet: String,
}

impl SearchResult {
    /// Creates a result with only a link, for tests and fixtures
    pub fn from_link(link: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            title: String::new(),
            snippet: String::new(),
        }
    }
}

/// Search capability used by the enrichment loop
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Runs a search and returns results in API order
    ///
    /// # Arguments
    ///
    /// * `query` - Query text, sent verbatim
    /// * `kind` - Web or image search
    /// * `num` - Maximum number of results to request (1-10)
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the API answers with a
    /// non-success status
    async fn search(&self, query: &str, kind: SearchKind, num: u8) -> Result<Vec<SearchResult>>;
}

/// Google Custom Search JSON API client
///
/// # Examples
///
/// ```
/// use toplist::config::SearchConfig;
/// use toplist::search::GoogleSearchClient;
///
/// let config = SearchConfig {
///     api_key: Some("key".to_string()),
///     cse_id: Some("cx".to_string()),
///     api_base: None,
///     image_results: 10,
/// };
/// let client = GoogleSearchClient::new(config);
/// assert!(client.is_ok());
/// ```
#[derive(Debug)]
pub struct GoogleSearchClient {
    client: Client,
    api_key: String,
    cse_id: String,
    api_base: String,
}

/// Response envelope from the Custom Search API
///
/// The API omits `items` entirely when there are no results, so the
/// field defaults to an empty vec instead of failing deserialization.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchResult>,
}

impl GoogleSearchClient {
    /// Create a new Custom Search client
    ///
    /// # Arguments
    ///
    /// * `config` - Search configuration with credentials and base URL
    ///
    /// # Errors
    ///
    /// Returns `MissingCredentials` if the API key or the engine id is
    /// absent. Callers treat this as "run without enrichment", not as a
    /// startup failure.
    pub fn new(config: SearchConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ToplistError::MissingCredentials("GOOGLE_API_KEY".to_string()))?;
        let cse_id = config
            .cse_id
            .filter(|c| !c.is_empty())
            .ok_or_else(|| ToplistError::MissingCredentials("GOOGLE_CSE_ID".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("toplist/0.1.0")
            .build()
            .map_err(|e| ToplistError::Search(format!("Failed to create HTTP client: {}", e)))?;

        let api_base = config
            .api_base
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        tracing::info!("Initialized Custom Search client: cx={}", cse_id);

        Ok(Self {
            client,
            api_key,
            cse_id,
            api_base,
        })
    }
}

#[async_trait]
impl SearchClient for GoogleSearchClient {
    async fn search(&self, query: &str, kind: SearchKind, num: u8) -> Result<Vec<SearchResult>> {
        let url = format!("{}/customsearch/v1", self.api_base);
        let num = num.to_string();

        let mut params = vec![
            ("key", self.api_key.as_str()),
            ("cx", self.cse_id.as_str()),
            ("q", query),
            ("num", num.as_str()),
        ];
        if kind == SearchKind::Image {
            params.push(("searchType", "image"));
        }

        tracing::debug!("Custom Search request: q={}, kind={:?}, num={}", query, kind, num);

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Custom Search request failed: {}", e);
                ToplistError::Search(format!("Custom Search request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!("Custom Search returned error {}: {}", status, error_text);
            return Err(ToplistError::Search(format!(
                "Custom Search returned error {}: {}",
                status, error_text
            ))
            .into());
        }

        let parsed: SearchResponse = response.json().await.map_err(|e| {
            tracing::warn!("Failed to parse Custom Search response: {}", e);
            ToplistError::Search(format!("Failed to parse Custom Search response: {}", e))
        })?;

        tracing::debug!("Custom Search returned {} results", parsed.items.len());
        Ok(parsed.items)
    }
}
