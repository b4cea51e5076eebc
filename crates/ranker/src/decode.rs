//! Decoding of the model's completion text into suggestions.
//!
//! The completion is decoded as a small tagged union: a bare JSON array, or
//! an object holding the array under one of [`LIST_KEYS`]. Anything else
//! yields no items. `items` is the key the prompt asks for; `suggestions`
//! and `data` are still accepted from older prompts and models.

use catalog::Suggestion;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::RerankError;

/// Keys searched, in order, for the item array of an object completion
pub const LIST_KEYS: [&str; 3] = ["items", "suggestions", "data"];

/// Key the prompt asks the model to use
pub const CANONICAL_LIST_KEY: &str = LIST_KEYS[0];

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CompletionPayload {
    List(Vec<Value>),
    Object(Map<String, Value>),
}

/// One item as the model returned it; every field may be missing or null.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RankedItem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default, alias = "video_id")]
    video_id: Option<String>,
    #[serde(default, alias = "channel_title")]
    channel_title: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default, alias = "published_at")]
    published_at: Option<String>,
}

impl From<RankedItem> for Suggestion {
    fn from(item: RankedItem) -> Self {
        Suggestion {
            title: item.title,
            video_id: item.video_id,
            channel_title: item.channel_title,
            url: item.url,
            reason: item.reason.unwrap_or_default(),
            tags: item.tags.unwrap_or_default(),
            published_at: item.published_at,
        }
    }
}

/// Decode a completion into at most `limit` suggestions, in model order.
pub fn decode_suggestions(content: &str, limit: usize) -> Result<Vec<Suggestion>, RerankError> {
    let payload: CompletionPayload = serde_json::from_str(strip_code_fence(content))?;

    let items = match payload {
        CompletionPayload::List(items) => items,
        CompletionPayload::Object(mut object) => take_item_list(&mut object),
    };

    items
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(index, value)| {
            if !value.is_object() {
                return Err(RerankError::MalformedItem {
                    index,
                    reason: "expected a JSON object".to_string(),
                });
            }
            serde_json::from_value::<RankedItem>(value)
                .map(Suggestion::from)
                .map_err(|e| RerankError::MalformedItem {
                    index,
                    reason: e.to_string(),
                })
        })
        .collect()
}

/// First non-empty array stored under one of the accepted keys
fn take_item_list(object: &mut Map<String, Value>) -> Vec<Value> {
    for key in LIST_KEYS {
        if let Some(Value::Array(items)) = object.remove(key) {
            if !items.is_empty() {
                return items;
            }
        }
    }
    Vec::new()
}

/// Unwrap a completion fenced as a Markdown code block
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.trim_end();
    let rest = rest.strip_suffix("```").unwrap_or(rest);

    // Drop the info string ("json") on the opening fence
    let body = match rest.split_once('\n') {
        Some((info, body)) if !info.trim_start().starts_with(['{', '[']) => body,
        _ => {
            let inline = rest.trim_start();
            inline.strip_prefix("json").unwrap_or(inline)
        }
    };
    body.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_canonical_object() {
        let content = r#"{"items": [
            {"title": "Song B", "videoId": "vid2", "channelTitle": "Ch2", "url": "u2",
             "reason": "mellow", "tags": ["lofi", "study"], "publishedAt": "2024-01-02"},
            {"title": "Song A", "videoId": "vid1"}
        ]}"#;

        let suggestions = decode_suggestions(content, 10).unwrap();
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].video_id.as_deref(), Some("vid2"));
        assert_eq!(suggestions[0].reason, "mellow");
        assert_eq!(suggestions[0].tags, vec!["lofi", "study"]);
        assert_eq!(suggestions[1].video_id.as_deref(), Some("vid1"));
        assert_eq!(suggestions[1].reason, "");
        assert!(suggestions[1].tags.is_empty());
        assert_eq!(suggestions[1].channel_title, None);
    }

    #[test]
    fn test_decodes_bare_list() {
        let content = r#"[{"videoId": "a"}, {"videoId": "b"}]"#;
        let suggestions = decode_suggestions(content, 10).unwrap();
        let ids: Vec<_> = suggestions.iter().map(|s| s.video_id.as_deref()).collect();
        assert_eq!(ids, vec![Some("a"), Some("b")]);
    }

    #[test]
    fn test_legacy_keys_are_accepted() {
        let suggestions = decode_suggestions(r#"{"suggestions": [{"videoId": "s"}]}"#, 5).unwrap();
        assert_eq!(suggestions[0].video_id.as_deref(), Some("s"));

        let suggestions = decode_suggestions(r#"{"data": [{"videoId": "d"}]}"#, 5).unwrap();
        assert_eq!(suggestions[0].video_id.as_deref(), Some("d"));
    }

    #[test]
    fn test_empty_canonical_list_falls_through() {
        let content = r#"{"items": [], "suggestions": [{"videoId": "s"}]}"#;
        let suggestions = decode_suggestions(content, 5).unwrap();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].video_id.as_deref(), Some("s"));
    }

    #[test]
    fn test_unknown_key_yields_nothing() {
        let suggestions = decode_suggestions(r#"{"picks": [{"videoId": "x"}]}"#, 5).unwrap();
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_null_reason_and_tags_get_defaults() {
        let content = r#"[{"videoId": "a", "reason": null, "tags": null}]"#;
        let suggestions = decode_suggestions(content, 5).unwrap();
        assert_eq!(suggestions[0].reason, "");
        assert!(suggestions[0].tags.is_empty());
    }

    #[test]
    fn test_items_beyond_limit_are_dropped() {
        let content = r#"[{"videoId": "a"}, {"videoId": "b"}, {"videoId": "c"}]"#;
        let suggestions = decode_suggestions(content, 2).unwrap();
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[1].video_id.as_deref(), Some("b"));

        assert!(decode_suggestions(content, 0).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let err = decode_suggestions("Here are my picks!", 5).unwrap_err();
        assert!(matches!(err, RerankError::InvalidJson(_)));

        let err = decode_suggestions(r#""just a string""#, 5).unwrap_err();
        assert!(matches!(err, RerankError::InvalidJson(_)));
    }

    #[test]
    fn test_non_object_item_is_an_error() {
        let err = decode_suggestions(r#"["vid1"]"#, 5).unwrap_err();
        assert!(matches!(err, RerankError::MalformedItem { index: 0, .. }));

        let err = decode_suggestions(r#"[{"videoId": "a", "tags": "lofi"}]"#, 5).unwrap_err();
        assert!(matches!(err, RerankError::MalformedItem { index: 0, .. }));
    }

    #[test]
    fn test_code_fenced_completion() {
        let content = "```json\n{\"items\": [{\"videoId\": \"f\"}]}\n```";
        let suggestions = decode_suggestions(content, 5).unwrap();
        assert_eq!(suggestions[0].video_id.as_deref(), Some("f"));
    }

    #[test]
    fn test_single_line_code_fence() {
        for content in [
            "```{\"items\": [{\"videoId\": \"vid1\"}]}```",
            "```json {\"items\": [{\"videoId\": \"vid1\"}]}```",
            "```[{\"videoId\": \"vid1\"}]```",
        ] {
            let suggestions = decode_suggestions(content, 5).unwrap();
            assert_eq!(suggestions.len(), 1, "content: {content}");
            assert_eq!(suggestions[0].video_id.as_deref(), Some("vid1"));
        }
    }

    #[test]
    fn test_fence_without_info_string() {
        let content = "```\n[{\"videoId\": \"a\"}]\n```";
        let suggestions = decode_suggestions(content, 5).unwrap();
        assert_eq!(suggestions[0].video_id.as_deref(), Some("a"));

        let content = "```{\"items\": [\n{\"videoId\": \"b\"}\n]}```";
        let suggestions = decode_suggestions(content, 5).unwrap();
        assert_eq!(suggestions[0].video_id.as_deref(), Some("b"));
    }

    #[test]
    fn test_snake_case_fields_are_accepted() {
        let content = r#"[{"video_id": "a", "channel_title": "Ch", "published_at": "2020"}]"#;
        let suggestions = decode_suggestions(content, 5).unwrap();
        assert_eq!(suggestions[0].video_id.as_deref(), Some("a"));
        assert_eq!(suggestions[0].channel_title.as_deref(), Some("Ch"));
        assert_eq!(suggestions[0].published_at.as_deref(), Some("2020"));
    }
}
