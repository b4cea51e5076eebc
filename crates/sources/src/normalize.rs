//! Candidate Normalizer
//!
//! Maps raw provider records into [`Candidate`]s in provider order. Records
//! without a video id are skipped, and a video id seen twice keeps its
//! first record.

use std::collections::HashSet;

use catalog::Candidate;
use tracing::debug;

use crate::types::{RawSnippet, SearchResponse};

/// Normalize a search payload into candidates.
///
/// Pure: never fails, output length is at most the input length, and every
/// output candidate has a non-empty `video_id`.
pub fn normalize_candidates(response: SearchResponse) -> Vec<Candidate> {
    let total = response.items.len();
    let mut seen: HashSet<String> = HashSet::with_capacity(total);

    let candidates: Vec<Candidate> = response
        .items
        .into_iter()
        .filter_map(|item| {
            let video_id = item.video_id()?.to_string();
            if !seen.insert(video_id.clone()) {
                return None;
            }
            let RawSnippet {
                title,
                channel_title,
                published_at,
            } = item.snippet.unwrap_or_default();
            Some(Candidate::new(video_id, title, channel_title, published_at))
        })
        .collect();

    debug!(
        "Normalized {} of {} raw records into candidates",
        candidates.len(),
        total
    );
    candidates
}
