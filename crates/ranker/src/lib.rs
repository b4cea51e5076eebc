//! LLM re-ranking of search candidates.
//!
//! This crate turns normalized candidates into suggestions. It handles:
//! - Disabled mode: truncate the candidates, no external call
//! - Prompt construction for an OpenAI-compatible chat model
//! - JSON output negotiation and decoding of the model's reply
//! - Fallback to the truncated candidates on any failure
//!
//! [`Reranker::rerank`] never fails. Its [`RerankOutcome`] records which path
//! produced the list and always unwraps to suggestions.

pub mod decode;
pub mod openai;
pub mod prompt;

use catalog::{Candidate, SearchQuery, Suggestion};
use reqwest::StatusCode;
use thiserror::Error;
use tracing::{error, info};

pub use decode::{decode_suggestions, CANONICAL_LIST_KEY, LIST_KEYS};
pub use openai::{ChatClient, Message, DEFAULT_BASE_URL};
pub use prompt::{build_prompt, SYSTEM_PROMPT};

/// Errors that can occur while asking the model to re-rank
#[derive(Error, Debug)]
pub enum RerankError {
    #[error("completion request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("model provider returned HTTP {status}: {body}")]
    Provider { status: StatusCode, body: String },

    #[error("model returned no completion text")]
    EmptyCompletion,

    #[error("model returned invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("model returned a malformed item at index {index}: {reason}")]
    MalformedItem { index: usize, reason: String },
}

/// Which path produced a re-ranked list
#[derive(Debug)]
pub enum RerankOutcome {
    /// The model curated the list
    Ranked(Vec<Suggestion>),
    /// Re-ranking is disabled; candidates were truncated
    Passthrough(Vec<Suggestion>),
    /// The model call failed; candidates were truncated instead
    Fallback {
        suggestions: Vec<Suggestion>,
        reason: RerankError,
    },
}

impl RerankOutcome {
    pub fn suggestions(&self) -> &[Suggestion] {
        match self {
            RerankOutcome::Ranked(suggestions) | RerankOutcome::Passthrough(suggestions) => {
                suggestions
            }
            RerankOutcome::Fallback { suggestions, .. } => suggestions,
        }
    }

    pub fn into_suggestions(self) -> Vec<Suggestion> {
        match self {
            RerankOutcome::Ranked(suggestions) | RerankOutcome::Passthrough(suggestions) => {
                suggestions
            }
            RerankOutcome::Fallback { suggestions, .. } => suggestions,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, RerankOutcome::Fallback { .. })
    }
}

/// Truncate candidates to `limit` and wrap them without curation metadata.
pub fn passthrough(candidates: &[Candidate], limit: usize) -> Vec<Suggestion> {
    candidates
        .iter()
        .take(limit)
        .map(Suggestion::from_candidate)
        .collect()
}

#[derive(Debug, Clone)]
enum RerankMode {
    Disabled,
    OpenAi(ChatClient),
}

/// Re-ranker selected by configuration.
#[derive(Debug, Clone)]
pub struct Reranker {
    mode: RerankMode,
}

impl Reranker {
    /// Re-ranker that never consults a model
    pub fn disabled() -> Self {
        Self {
            mode: RerankMode::Disabled,
        }
    }

    /// Re-ranker backed by an OpenAI-compatible chat model
    pub fn openai(client: ChatClient) -> Self {
        Self {
            mode: RerankMode::OpenAi(client),
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self.mode, RerankMode::OpenAi(_))
    }

    /// Select, annotate and order at most `limit` suggestions.
    pub async fn rerank(
        &self,
        query: &SearchQuery,
        candidates: &[Candidate],
        limit: usize,
    ) -> RerankOutcome {
        let client = match &self.mode {
            RerankMode::Disabled => {
                info!("LLM re-ranking disabled; truncating {} candidates", candidates.len());
                return RerankOutcome::Passthrough(passthrough(candidates, limit));
            }
            RerankMode::OpenAi(client) => client,
        };

        match Self::ask_model(client, query, candidates, limit).await {
            Ok(suggestions) => {
                info!(
                    "Model {} ranked {} of {} candidates",
                    client.model(),
                    suggestions.len(),
                    candidates.len()
                );
                RerankOutcome::Ranked(suggestions)
            }
            Err(reason) => {
                error!(
                    "LLM rerank failed or returned invalid JSON: {}. Falling back to candidates.",
                    reason
                );
                RerankOutcome::Fallback {
                    suggestions: passthrough(candidates, limit),
                    reason,
                }
            }
        }
    }

    async fn ask_model(
        client: &ChatClient,
        query: &SearchQuery,
        candidates: &[Candidate],
        limit: usize,
    ) -> Result<Vec<Suggestion>, RerankError> {
        let messages = [
            Message::system(SYSTEM_PROMPT),
            Message::user(build_prompt(query, candidates, limit)),
        ];
        let content = client.complete(&messages).await?;
        decode_suggestions(&content, limit)
    }
}
