//! Core domain types for music suggestions.
//!
//! A request becomes a [`SearchQuery`], the search provider's records become
//! [`Candidate`]s, and the re-ranker turns candidates into [`Suggestion`]s
//! that are returned inside a [`SuggestResponse`].

use serde::{Deserialize, Serialize};

use crate::error::{QueryError, Result};

// =============================================================================
// Type Aliases and Constants
// =============================================================================

/// Provider identifier of a video (YouTube `videoId`)
pub type VideoId = String;

/// Prefix every candidate URL is derived from
pub const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";

/// Number of suggestions returned when the request does not ask for a count
pub const DEFAULT_LIMIT: usize = 10;

/// Smallest accepted `limit`
pub const MIN_LIMIT: usize = 1;

/// Largest accepted `limit`
pub const MAX_LIMIT: usize = 25;

/// Build the watch URL for a video id
pub fn watch_url(video_id: &str) -> String {
    format!("{}{}", WATCH_URL_PREFIX, video_id)
}

// =============================================================================
// Search Query
// =============================================================================

/// A validated suggestion request.
///
/// Constructed once per request through [`SearchQuery::new`] and never
/// mutated afterwards, so the fields are only reachable through accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    genre: String,
    mood: Option<String>,
    era: Option<String>,
    language: Option<String>,
    result_limit: usize,
}

impl SearchQuery {
    /// Validate the raw request fields.
    ///
    /// Optional hints that are empty or only whitespace are treated as absent.
    /// A missing `limit` falls back to [`DEFAULT_LIMIT`].
    pub fn new(
        genre: impl Into<String>,
        mood: Option<String>,
        era: Option<String>,
        language: Option<String>,
        limit: Option<i64>,
    ) -> Result<Self> {
        let genre = genre.into().trim().to_string();
        if genre.is_empty() {
            return Err(QueryError::EmptyGenre);
        }

        let result_limit = match limit {
            None => DEFAULT_LIMIT,
            Some(value) if value >= MIN_LIMIT as i64 && value <= MAX_LIMIT as i64 => {
                value as usize
            }
            Some(value) => {
                return Err(QueryError::LimitOutOfRange {
                    value,
                    min: MIN_LIMIT,
                    max: MAX_LIMIT,
                });
            }
        };

        Ok(Self {
            genre,
            mood: non_blank(mood),
            era: non_blank(era),
            language: non_blank(language),
            result_limit,
        })
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn mood(&self) -> Option<&str> {
        self.mood.as_deref()
    }

    pub fn era(&self) -> Option<&str> {
        self.era.as_deref()
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn result_limit(&self) -> usize {
        self.result_limit
    }

    /// Free-text query sent to the search provider: genre, mood, era and
    /// language joined by single spaces, skipping absent hints.
    pub fn search_text(&self) -> String {
        let mut terms = vec![self.genre.as_str()];
        terms.extend(self.mood());
        terms.extend(self.era());
        terms.extend(self.language());
        terms.join(" ")
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// =============================================================================
// Candidates and Suggestions
// =============================================================================

/// A normalized video record eligible for ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub title: Option<String>,
    pub video_id: VideoId,
    pub channel_title: Option<String>,
    pub url: String,
    pub published_at: Option<String>,
}

impl Candidate {
    /// Create a candidate; the URL is derived from the video id.
    pub fn new(
        video_id: impl Into<VideoId>,
        title: Option<String>,
        channel_title: Option<String>,
        published_at: Option<String>,
    ) -> Self {
        let video_id = video_id.into();
        Self {
            url: watch_url(&video_id),
            title,
            video_id,
            channel_title,
            published_at,
        }
    }
}

/// A final, possibly curated and annotated, output record.
///
/// Every field the model may omit is optional. `reason` and `tags` always
/// have a value so clients never see `null` for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub title: Option<String>,
    pub video_id: Option<VideoId>,
    pub channel_title: Option<String>,
    pub url: Option<String>,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub published_at: Option<String>,
}

impl Suggestion {
    /// Wrap a candidate without curation metadata.
    pub fn from_candidate(candidate: &Candidate) -> Self {
        Self {
            title: candidate.title.clone(),
            video_id: Some(candidate.video_id.clone()),
            channel_title: candidate.channel_title.clone(),
            url: Some(candidate.url.clone()),
            reason: String::new(),
            tags: Vec::new(),
            published_at: candidate.published_at.clone(),
        }
    }

    /// The video id, if present and non-empty.
    pub fn video_id(&self) -> Option<&str> {
        self.video_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Fill fields the model left out with the candidate's values.
    ///
    /// Fields the suggestion already carries are left untouched.
    pub fn backfill_from(&mut self, candidate: &Candidate) {
        if self.title.is_none() {
            self.title = candidate.title.clone();
        }
        if self.channel_title.is_none() {
            self.channel_title = candidate.channel_title.clone();
        }
        if self.url.is_none() {
            self.url = Some(candidate.url.clone());
        }
        if self.published_at.is_none() {
            self.published_at = candidate.published_at.clone();
        }
    }
}

// =============================================================================
// Response
// =============================================================================

/// How many records entered and left the ranking step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCounts {
    #[serde(rename = "youtube_candidates")]
    pub candidate_count: usize,
    #[serde(rename = "llm_ranked")]
    pub suggestion_count: usize,
}

/// Body of a successful `/suggest` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestResponse {
    pub suggestions: Vec<Suggestion>,
    pub source_counts: SourceCounts,
}

impl SuggestResponse {
    pub fn new(suggestions: Vec<Suggestion>, candidate_count: usize) -> Self {
        let source_counts = SourceCounts {
            candidate_count,
            suggestion_count: suggestions.len(),
        };
        Self {
            suggestions,
            source_counts,
        }
    }
}
