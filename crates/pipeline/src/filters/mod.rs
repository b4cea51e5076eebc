//! Filter implementations for the suggestion pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod duplicate_video;
pub mod known_candidate;
pub mod missing_video_id;

// Re-export for convenience
pub use duplicate_video::DuplicateVideoFilter;
pub use known_candidate::KnownCandidateFilter;
pub use missing_video_id::MissingVideoIdFilter;
