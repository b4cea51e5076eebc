//! Filter to keep one suggestion per video.

use crate::context::RankingContext;
use crate::traits::Filter;
use catalog::Suggestion;
use std::collections::HashSet;

/// Keeps the first suggestion for each video id and drops later repeats.
///
/// Suggestions without an id are left alone; that concern belongs to
/// MissingVideoIdFilter.
pub struct DuplicateVideoFilter;

impl Filter for DuplicateVideoFilter {
    fn name(&self) -> &str {
        "DuplicateVideoFilter"
    }

    fn apply(&self, suggestions: Vec<Suggestion>, _context: &RankingContext) -> Vec<Suggestion> {
        let mut seen = HashSet::new();
        suggestions
            .into_iter()
            .filter(|suggestion| match suggestion.video_id() {
                Some(video_id) => seen.insert(video_id.to_string()),
                None => true,
            })
            .collect()
    }
}
