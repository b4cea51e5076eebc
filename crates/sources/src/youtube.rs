//! YouTube Search Source
//!
//! Issues one `search.list` query restricted to the music category and
//! returns the raw payload. Transient failures (network errors, timeouts,
//! non-2xx statuses) are retried with the configured [`RetryPolicy`].

use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::retry::{RetryPolicy, Transient};
use crate::types::SearchResponse;

/// Public endpoint of the YouTube Data API v3
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// YouTube video category id for "Music"
const MUSIC_CATEGORY_ID: &str = "10";

/// `maxResults` ceiling accepted by the API
const PROVIDER_MAX_RESULTS: usize = 50;

/// Errors that can occur while querying the search provider
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("search provider returned HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("invalid search response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl Transient for SearchError {
    fn is_transient(&self) -> bool {
        matches!(self, SearchError::Request(_) | SearchError::Status { .. })
    }
}

/// Parameters of one search call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub max_results: usize,
    pub language: String,
}

/// Client for the video-search provider.
///
/// Cheap to clone: the underlying `reqwest::Client` shares its pool.
#[derive(Debug, Clone)]
pub struct YouTubeSearchClient {
    client: Client,
    base_url: String,
    api_key: String,
    retry: RetryPolicy,
}

impl YouTubeSearchClient {
    /// Create a client whose every request is bounded by `timeout`
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self, SearchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            retry: RetryPolicy::default(),
        })
    }

    /// Point the client at another API root (stub servers, proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Replace the default retry policy
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search for music videos matching `request.query`
    #[instrument(skip(self, request), fields(query = %request.query))]
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        let response = self
            .retry
            .run(|attempt| self.search_once(request, attempt))
            .await?;

        info!(
            "YouTube search returned {} items for query='{}'",
            response.items.len(),
            request.query
        );
        Ok(response)
    }

    async fn search_once(
        &self,
        request: &SearchRequest,
        attempt: u32,
    ) -> Result<SearchResponse, SearchError> {
        debug!("Search attempt {} for query '{}'", attempt, request.query);

        let url = format!("{}/search", self.base_url);
        let max_results = request.max_results.min(PROVIDER_MAX_RESULTS).to_string();
        let params = [
            ("key", self.api_key.as_str()),
            ("part", "snippet"),
            ("type", "video"),
            ("videoCategoryId", MUSIC_CATEGORY_ID),
            ("maxResults", max_results.as_str()),
            ("q", request.query.as_str()),
            ("relevanceLanguage", request.language.as_str()),
            ("safeSearch", "moderate"),
        ];

        let http_response = self.client.get(&url).query(&params).send().await?;

        let status = http_response.status();
        if !status.is_success() {
            let body = http_response.text().await.unwrap_or_default();
            return Err(SearchError::Status { status, body });
        }

        let text = http_response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}
