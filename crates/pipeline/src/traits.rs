//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to re-ranked suggestions.

use crate::context::RankingContext;
use catalog::Suggestion;

/// Core trait for filtering suggestions.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// Filters take ownership of the suggestions and return the ones they keep,
/// in their original order. Filtering cannot fail: a suggestion is either
/// kept or dropped.
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of suggestions.
    ///
    /// # Arguments
    /// * `suggestions` - The suggestions to filter (takes ownership)
    /// * `context` - The candidates of the current request
    fn apply(&self, suggestions: Vec<Suggestion>, context: &RankingContext) -> Vec<Suggestion>;
}
