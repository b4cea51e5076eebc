//! Per-request context shared by every filter.

use catalog::{Candidate, VideoId};
use std::collections::HashMap;

/// The candidates of the current request, keyed by video id.
///
/// Built once after normalization; filters use it to check that a
/// suggestion traces back to something the search provider returned.
#[derive(Debug, Clone, Default)]
pub struct RankingContext {
    candidates: HashMap<VideoId, Candidate>,
}

impl RankingContext {
    pub fn new(candidates: &[Candidate]) -> Self {
        let mut by_id = HashMap::with_capacity(candidates.len());
        for candidate in candidates {
            by_id
                .entry(candidate.video_id.clone())
                .or_insert_with(|| candidate.clone());
        }
        Self { candidates: by_id }
    }

    pub fn contains(&self, video_id: &str) -> bool {
        self.candidates.contains_key(video_id)
    }

    /// Candidate with this id, if it was part of the request
    pub fn candidate(&self, video_id: &str) -> Option<&Candidate> {
        self.candidates.get(video_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_lookup() {
        let context = RankingContext::new(&[
            Candidate::new("vid1", Some("Song 1".to_string()), None, None),
            Candidate::new("vid2", None, None, None),
        ]);

        assert!(context.contains("vid1"));
        assert!(context.contains("vid2"));
        assert!(!context.contains("vid3"));
        assert_eq!(
            context.candidate("vid1").and_then(|c| c.title.as_deref()),
            Some("Song 1")
        );
    }

    #[test]
    fn test_first_candidate_wins_on_duplicate_ids() {
        let context = RankingContext::new(&[
            Candidate::new("vid1", Some("First".to_string()), None, None),
            Candidate::new("vid1", Some("Second".to_string()), None, None),
        ]);

        assert_eq!(
            context.candidate("vid1").and_then(|c| c.title.as_deref()),
            Some("First")
        );
    }
}
