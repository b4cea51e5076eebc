//! # Catalog Crate
//!
//! Domain types shared by every stage of the suggestion pipeline.
//!
//! ## Main Components
//!
//! - **types**: `SearchQuery`, `Candidate`, `Suggestion`, `SuggestResponse`
//! - **error**: validation errors raised while building a `SearchQuery`
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{Candidate, SearchQuery, Suggestion};
//!
//! let query = SearchQuery::new("lofi", Some("chill".into()), None, None, Some(5))?;
//! assert_eq!(query.search_text(), "lofi chill");
//!
//! let candidate = Candidate::new("dQw4w9WgXcQ", Some("Song".into()), None, None);
//! let suggestion = Suggestion::from_candidate(&candidate);
//! ```

// Public modules
pub mod error;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{QueryError, Result};
pub use types::{
    // Type aliases
    VideoId,
    // Core types
    Candidate,
    SearchQuery,
    SourceCounts,
    SuggestResponse,
    Suggestion,
    // Helpers and limits
    DEFAULT_LIMIT,
    MAX_LIMIT,
    MIN_LIMIT,
    WATCH_URL_PREFIX,
    watch_url,
};
