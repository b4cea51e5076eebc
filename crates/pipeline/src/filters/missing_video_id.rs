//! Filter to remove suggestions that name no video.
//!
//! The model is free to return items without a `videoId`; such an item
//! cannot be played or traced back to a search result.

use crate::context::RankingContext;
use crate::traits::Filter;
use catalog::Suggestion;

/// Removes suggestions whose video id is absent or empty.
pub struct MissingVideoIdFilter;

impl Filter for MissingVideoIdFilter {
    fn name(&self) -> &str {
        "MissingVideoIdFilter"
    }

    fn apply(&self, suggestions: Vec<Suggestion>, _context: &RankingContext) -> Vec<Suggestion> {
        suggestions
            .into_iter()
            .filter(|suggestion| suggestion.video_id().is_some())
            .collect()
    }
}
