//! Filter to remove suggestions the search provider never returned.
//!
//! Language models occasionally invent plausible-looking video ids. Every
//! suggestion that survives this filter names a candidate of the request.

use crate::context::RankingContext;
use crate::traits::Filter;
use catalog::Suggestion;

/// Removes suggestions whose video id is not among the request's candidates.
///
/// ## Algorithm
/// Uses the candidate map in RankingContext for O(1) lookups.
pub struct KnownCandidateFilter;

impl Filter for KnownCandidateFilter {
    fn name(&self) -> &str {
        "KnownCandidateFilter"
    }

    fn apply(&self, suggestions: Vec<Suggestion>, context: &RankingContext) -> Vec<Suggestion> {
        suggestions
            .into_iter()
            .filter(|suggestion| {
                suggestion
                    .video_id()
                    .is_some_and(|video_id| context.contains(video_id))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::Candidate;

    #[test]
    fn test_known_candidate_filter() {
        let context = RankingContext::new(&[
            Candidate::new("vid1", None, None, None),
            Candidate::new("vid2", None, None, None),
        ]);

        let suggestions = ["vid2", "invented", "vid1"]
            .into_iter()
            .map(|id| Suggestion {
                video_id: Some(id.to_string()),
                ..Default::default()
            })
            .chain(std::iter::once(Suggestion::default()))
            .collect();

        let filtered = KnownCandidateFilter.apply(suggestions, &context);

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].video_id(), Some("vid2"));
        assert_eq!(filtered[1].video_id(), Some("vid1"));
    }
}
