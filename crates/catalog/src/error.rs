//! Error types for the catalog crate.
//!
//! Every variant describes a request that was rejected before any outbound
//! call was made.

use thiserror::Error;

/// Errors that can occur while building a [`SearchQuery`](crate::SearchQuery)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Genre was missing or only whitespace
    #[error("genre must be a non-empty string")]
    EmptyGenre,

    /// Requested number of suggestions is outside the accepted range
    #[error("limit must be between {min} and {max}, got {value}")]
    LimitOutOfRange { value: i64, min: usize, max: usize },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, QueryError>;
