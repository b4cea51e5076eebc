//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern.

use crate::context::RankingContext;
use crate::filters::{DuplicateVideoFilter, KnownCandidateFilter, MissingVideoIdFilter};
use crate::traits::Filter;
use catalog::Suggestion;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(MissingVideoIdFilter)
///     .add_filter(KnownCandidateFilter)
///     .add_filter(DuplicateVideoFilter);
///
/// let kept = pipeline.apply(suggestions, &context);
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Filters that guarantee every suggestion traces back to exactly one
    /// candidate of the request.
    pub fn standard() -> Self {
        Self::new()
            .add_filter(MissingVideoIdFilter)
            .add_filter(KnownCandidateFilter)
            .add_filter(DuplicateVideoFilter)
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Names of the configured filters, in application order
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|filter| filter.name()).collect()
    }

    /// Apply all filters in sequence to the suggestions.
    pub fn apply(&self, suggestions: Vec<Suggestion>, context: &RankingContext) -> Vec<Suggestion> {
        let mut current = suggestions;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current, context);
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        current
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::Candidate;

    fn suggestion(id: &str) -> Suggestion {
        Suggestion {
            video_id: Some(id.to_string()),
            ..Default::default()
        }
    }

    fn context() -> RankingContext {
        RankingContext::new(&[
            Candidate::new("vid1", None, None, None),
            Candidate::new("vid2", None, None, None),
        ])
    }

    #[test]
    fn test_empty_pipeline() {
        let pipeline = FilterPipeline::new();
        let suggestions = vec![suggestion("vid1"), suggestion("made-up")];

        let filtered = pipeline.apply(suggestions.clone(), &context());
        assert_eq!(filtered, suggestions);
    }

    #[test]
    fn test_single_filter() {
        let pipeline = FilterPipeline::new().add_filter(KnownCandidateFilter);

        let filtered = pipeline.apply(vec![suggestion("made-up"), suggestion("vid2")], &context());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].video_id(), Some("vid2"));
    }

    #[test]
    fn test_standard_filter_order() {
        assert_eq!(
            FilterPipeline::standard().filter_names(),
            vec!["MissingVideoIdFilter", "KnownCandidateFilter", "DuplicateVideoFilter"]
        );
    }
}
