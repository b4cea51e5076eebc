//! Integration tests for the pipeline.
//!
//! These tests run the standard filters over a realistic model reply.

use catalog::{Candidate, Suggestion};
use pipeline::filters::*;
use pipeline::{Filter, FilterPipeline, RankingContext};

fn create_test_setup() -> (RankingContext, Vec<Suggestion>) {
    let candidates = vec![
        Candidate::new(
            "vid1",
            Some("Lofi Beats".to_string()),
            Some("Ch1".to_string()),
            None,
        ),
        Candidate::new(
            "vid2",
            Some("Rainy Night".to_string()),
            Some("Ch2".to_string()),
            None,
        ),
        Candidate::new("vid3", Some("Study Mix".to_string()), None, None),
    ];

    // A reply mixing good picks with every kind of problem
    let suggestions = vec![
        Suggestion {
            video_id: Some("vid2".to_string()),
            reason: "soft rain ambience".to_string(),
            tags: vec!["rain".to_string()],
            ..Default::default()
        },
        Suggestion {
            title: Some("Hallucinated Hit".to_string()),
            video_id: Some("zzzzzzzzzzz".to_string()),
            ..Default::default()
        },
        Suggestion {
            title: Some("No id".to_string()),
            ..Default::default()
        },
        Suggestion {
            video_id: Some("vid1".to_string()),
            ..Default::default()
        },
        Suggestion {
            video_id: Some("vid2".to_string()),
            reason: "listed twice".to_string(),
            ..Default::default()
        },
    ];

    (RankingContext::new(&candidates), suggestions)
}

#[test]
fn test_standard_pipeline_keeps_only_traceable_suggestions() {
    let (context, suggestions) = create_test_setup();

    let kept = FilterPipeline::standard().apply(suggestions, &context);

    let ids: Vec<_> = kept.iter().filter_map(|s| s.video_id()).collect();
    assert_eq!(ids, vec!["vid2", "vid1"]);
    assert_eq!(kept[0].reason, "soft rain ambience");
    assert!(ids.iter().all(|id| context.contains(id)));
}

#[test]
fn test_filters_are_order_independent_for_the_final_set() {
    let (context, suggestions) = create_test_setup();

    let reversed = FilterPipeline::new()
        .add_filter(DuplicateVideoFilter)
        .add_filter(KnownCandidateFilter)
        .add_filter(MissingVideoIdFilter)
        .apply(suggestions.clone(), &context);
    let standard = FilterPipeline::standard().apply(suggestions, &context);

    assert_eq!(reversed, standard);
}

#[test]
fn test_custom_filter_composes_with_standard_ones() {
    struct TaggedOnly;

    impl Filter for TaggedOnly {
        fn name(&self) -> &str {
            "TaggedOnly"
        }

        fn apply(&self, suggestions: Vec<Suggestion>, _context: &RankingContext) -> Vec<Suggestion> {
            suggestions.into_iter().filter(|s| !s.tags.is_empty()).collect()
        }
    }

    let (context, suggestions) = create_test_setup();
    let kept = FilterPipeline::standard()
        .add_filter(TaggedOnly)
        .apply(suggestions, &context);

    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].video_id(), Some("vid2"));
}

#[test]
fn test_empty_input_stays_empty() {
    let (context, _) = create_test_setup();
    assert!(FilterPipeline::standard().apply(Vec::new(), &context).is_empty());
}
