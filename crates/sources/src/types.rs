//! Raw payload types returned by the YouTube Data API `search.list` call.
//!
//! Only the fields the normalizer reads are modelled. Each field is decoded
//! leniently: a value of the wrong shape becomes `None` instead of failing
//! the whole payload, so one odd record cannot sink a search.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Top-level search response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Vec<RawResult>,
}

/// One provider record. Usable only when `id.videoId` is present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawResult {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<RawResourceId>,
    #[serde(default, deserialize_with = "lenient")]
    pub snippet: Option<RawSnippet>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawResourceId {
    #[serde(rename = "videoId", default, deserialize_with = "lenient")]
    pub video_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSnippet {
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(rename = "channelTitle", default, deserialize_with = "lenient")]
    pub channel_title: Option<String>,
    #[serde(rename = "publishedAt", default, deserialize_with = "lenient")]
    pub published_at: Option<String>,
}

impl RawResult {
    /// The record's video id, if it has a non-empty one
    pub fn video_id(&self) -> Option<&str> {
        self.id
            .as_ref()
            .and_then(|id| id.video_id.as_deref())
            .filter(|id| !id.is_empty())
    }
}

/// Decode a field, mapping a value of the wrong shape to `None`
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}
