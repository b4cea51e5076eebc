//! # Suggestion Orchestrator
//!
//! This module coordinates the suggestion pipeline for one request:
//! 1. Check that the required credentials are configured
//! 2. Search the provider for candidate videos
//! 3. Normalize the raw payload into candidates
//! 4. Re-rank the candidates (LLM or passthrough)
//! 5. Filter suggestions that do not trace back to a candidate
//! 6. Backfill missing display fields and shape the response

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::{debug, info, instrument};

use catalog::{Candidate, SearchQuery, SuggestResponse, Suggestion};
use pipeline::{FilterPipeline, RankingContext};
use ranker::{ChatClient, Reranker};
use sources::{
    RetryPolicy, SearchError, SearchRequest, YouTubeSearchClient, language_hint,
    normalize_candidates,
};

use crate::config::{LlmProvider, Settings};

/// Smallest `maxResults` sent to the search provider
const MIN_SEARCH_RESULTS: usize = 5;

/// A credential the request path cannot run without
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credential {
    YouTubeApiKey,
    OpenAiApiKey,
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credential::YouTubeApiKey => write!(f, "YOUTUBE_API_KEY not configured"),
            Credential::OpenAiApiKey => {
                write!(f, "OPENAI_API_KEY not configured for LLM rerank")
            }
        }
    }
}

/// Errors that end a suggestion request
#[derive(Error, Debug)]
pub enum SuggestError {
    #[error("{0}")]
    MissingCredential(Credential),

    #[error("YouTube search failed: {0}")]
    Search(#[from] SearchError),

    #[error("No candidates found from YouTube")]
    NoCandidates,
}

/// Main orchestrator that coordinates the suggestion pipeline
#[derive(Clone)]
pub struct SuggestOrchestrator {
    settings: Arc<Settings>,
    search: YouTubeSearchClient,
    reranker: Reranker,
    filters: Arc<FilterPipeline>,
}

impl SuggestOrchestrator {
    /// Create the orchestrator and its outbound clients from `settings`.
    ///
    /// Missing credentials are not an error here; they are reported on
    /// every request instead so the service can start and answer `/healthz`.
    pub fn new(settings: Arc<Settings>) -> Result<Self> {
        let search = YouTubeSearchClient::new(
            settings.youtube_api_key.clone(),
            settings.request_timeout,
        )
        .context("Failed to build search client")?
        .with_base_url(settings.youtube_base_url.clone());

        let reranker = match (settings.llm_provider, &settings.openai_api_key) {
            (LlmProvider::OpenAi, Some(api_key)) => {
                let client = ChatClient::new(
                    api_key.clone(),
                    settings.openai_model.clone(),
                    settings.request_timeout,
                )
                .context("Failed to build chat client")?
                .with_base_url(settings.openai_base_url.clone());
                Reranker::openai(client)
            }
            _ => Reranker::disabled(),
        };

        info!(
            "Orchestrator ready (llm_provider: {}, rerank enabled: {})",
            settings.llm_provider,
            reranker.is_enabled()
        );

        Ok(Self {
            settings,
            search,
            reranker,
            filters: Arc::new(FilterPipeline::standard()),
        })
    }

    /// Replace the search retry policy
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.search = self.search.with_retry_policy(retry);
        self
    }

    pub fn settings(&self) -> &Arc<Settings> {
        &self.settings
    }

    /// Fail fast when a credential the pipeline needs is absent
    pub fn check_credentials(&self) -> Result<(), SuggestError> {
        if self.settings.youtube_api_key.is_empty() {
            return Err(SuggestError::MissingCredential(Credential::YouTubeApiKey));
        }
        if self.settings.llm_provider == LlmProvider::OpenAi
            && self.settings.openai_api_key.is_none()
        {
            return Err(SuggestError::MissingCredential(Credential::OpenAiApiKey));
        }
        Ok(())
    }

    /// Main entry point: run one validated query through the pipeline
    #[instrument(skip(self, query), fields(genre = %query.genre(), limit = query.result_limit()))]
    pub async fn suggest(&self, query: &SearchQuery) -> Result<SuggestResponse, SuggestError> {
        let start_time = Instant::now();
        self.check_credentials()?;

        let request = SearchRequest {
            query: query.search_text(),
            max_results: self.search_size(query.result_limit()),
            language: language_hint(query.language()),
        };
        let payload = self.search.search(&request).await?;

        let candidates = normalize_candidates(payload);
        if candidates.is_empty() {
            return Err(SuggestError::NoCandidates);
        }
        debug!("Normalized {} candidates", candidates.len());

        let limit = self.rerank_size(query.result_limit());
        let ranked = self
            .reranker
            .rerank(query, &candidates, limit)
            .await
            .into_suggestions();

        let suggestions = self.finalize(ranked, &candidates);
        let response = SuggestResponse::new(suggestions, candidates.len());

        info!("Responding with {} suggestions", response.suggestions.len());
        debug!("Suggestion pipeline took {:.2?}", start_time.elapsed());
        Ok(response)
    }

    /// `maxResults` for the search call: the request limit, at least
    /// [`MIN_SEARCH_RESULTS`], at most `MAX_YT_RESULTS`
    fn search_size(&self, result_limit: usize) -> usize {
        self.settings
            .max_yt_results
            .min(result_limit.max(MIN_SEARCH_RESULTS))
    }

    fn rerank_size(&self, result_limit: usize) -> usize {
        self.settings.max_suggestions.min(result_limit)
    }

    /// Drop untraceable suggestions, then backfill display fields
    fn finalize(&self, ranked: Vec<Suggestion>, candidates: &[Candidate]) -> Vec<Suggestion> {
        let context = RankingContext::new(candidates);
        self.filters
            .apply(ranked, &context)
            .into_iter()
            .map(|mut suggestion| {
                if let Some(candidate) = suggestion.video_id().and_then(|id| context.candidate(id)) {
                    suggestion.backfill_from(candidate);
                }
                suggestion
            })
            .collect()
    }
}
