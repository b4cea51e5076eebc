//! # Sources Crate
//!
//! Candidate generation for music suggestions.
//!
//! ## Components
//!
//! ### YouTube Search
//! One `search.list` call per request, restricted to the music category with
//! moderate safe-search and a relevance-language hint. Transient failures
//! are retried with bounded exponential backoff (3 attempts, 1s base, 8s cap).
//!
//! ### Normalizer
//! Turns the raw payload into `Candidate`s, keeping provider order and
//! dropping records that carry no video id.
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{normalize_candidates, SearchRequest, YouTubeSearchClient};
//! use std::time::Duration;
//!
//! let client = YouTubeSearchClient::new(api_key, Duration::from_secs(10))?;
//! let payload = client
//!     .search(&SearchRequest {
//!         query: "lofi chill".into(),
//!         max_results: 10,
//!         language: "en".into(),
//!     })
//!     .await?;
//! let candidates = normalize_candidates(payload);
//! ```

// Public modules
pub mod normalize;
pub mod retry;
pub mod types;
pub mod youtube;

// Re-export commonly used types
pub use normalize::normalize_candidates;
pub use retry::{RetryPolicy, Transient};
pub use types::{RawResourceId, RawResult, RawSnippet, SearchResponse};
pub use youtube::{DEFAULT_BASE_URL, SearchError, SearchRequest, YouTubeSearchClient};

/// Pick the `relevanceLanguage` hint for a request.
///
/// A 2-3 letter alphabetic language code is passed through lowercased;
/// anything else (a language name, an empty value) falls back to `en`.
pub fn language_hint(language: Option<&str>) -> String {
    match language.map(str::trim) {
        Some(code)
            if (2..=3).contains(&code.len()) && code.chars().all(|c| c.is_ascii_alphabetic()) =>
        {
            code.to_ascii_lowercase()
        }
        _ => "en".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_hint_passes_codes_through() {
        assert_eq!(language_hint(Some("es")), "es");
        assert_eq!(language_hint(Some("PT")), "pt");
        assert_eq!(language_hint(Some(" fil ")), "fil");
    }

    #[test]
    fn test_language_hint_defaults_to_english() {
        assert_eq!(language_hint(None), "en");
        assert_eq!(language_hint(Some("Spanish")), "en");
        assert_eq!(language_hint(Some("e1")), "en");
        assert_eq!(language_hint(Some("")), "en");
    }
}
