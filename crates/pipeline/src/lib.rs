//! Pipeline for filtering re-ranked suggestions.
//!
//! This crate provides:
//! - Filter trait and implementations for suggestion filtering
//! - FilterPipeline for composing filters
//! - RankingContext carrying the candidates of the current request
//!
//! ## Architecture
//! The re-ranker may return items without an id, with an id it invented,
//! or the same video twice. Filters run in order after re-ranking:
//! 1. MissingVideoIdFilter drops items that name no video
//! 2. KnownCandidateFilter drops ids that were not search results
//! 3. DuplicateVideoFilter keeps the first item per video
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{FilterPipeline, RankingContext};
//!
//! let context = RankingContext::new(&candidates);
//! let kept = FilterPipeline::standard().apply(suggestions, &context);
//! ```

pub mod context;
pub mod filter_pipeline;
pub mod filters;
pub mod traits;

// Re-export main types
pub use context::RankingContext;
pub use filter_pipeline::FilterPipeline;
pub use traits::Filter;
