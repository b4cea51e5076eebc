//! Runtime configuration read once at startup.
//!
//! Every setting comes from a process environment variable. Missing
//! variables take their defaults; values that are present but cannot be
//! parsed abort startup.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use thiserror::Error;

/// Default search API root
pub const DEFAULT_YOUTUBE_BASE_URL: &str = sources::DEFAULT_BASE_URL;
/// Default chat-completions API root
pub const DEFAULT_OPENAI_BASE_URL: &str = ranker::DEFAULT_BASE_URL;
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// Errors raised while parsing a single setting
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown LLM provider '{0}' (expected openai, none or disabled)")]
    UnknownProvider(String),

    #[error("rate limit '{0}' is not of the form N/second|minute|hour|day")]
    InvalidRateLimit(String),
}

/// Which language model, if any, re-ranks the candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    OpenAi,
    Disabled,
}

impl FromStr for LlmProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(LlmProvider::OpenAi),
            "none" | "disabled" => Ok(LlmProvider::Disabled),
            _ => Err(ConfigError::UnknownProvider(s.to_string())),
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmProvider::OpenAi => write!(f, "openai"),
            LlmProvider::Disabled => write!(f, "disabled"),
        }
    }
}

/// Requests allowed per client per window, e.g. `10/minute`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateQuota {
    pub max_requests: u32,
    pub window: Duration,
}

impl RateQuota {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
        }
    }

    pub fn per_minute(max_requests: u32) -> Self {
        Self::new(max_requests, Duration::from_secs(60))
    }
}

impl Default for RateQuota {
    fn default() -> Self {
        Self::per_minute(10)
    }
}

impl FromStr for RateQuota {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidRateLimit(s.to_string());

        let (count, unit) = s.trim().split_once('/').ok_or_else(invalid)?;
        let max_requests: u32 = count.trim().parse().map_err(|_| invalid())?;
        if max_requests == 0 {
            return Err(invalid());
        }

        let seconds = match unit.trim().to_ascii_lowercase().as_str() {
            "second" | "seconds" | "s" => 1,
            "minute" | "minutes" | "m" => 60,
            "hour" | "hours" | "h" => 60 * 60,
            "day" | "days" | "d" => 24 * 60 * 60,
            _ => return Err(invalid()),
        };

        Ok(Self::new(max_requests, Duration::from_secs(seconds)))
    }
}

/// Service settings, immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Search API key; empty means every `/suggest` call fails with 500
    pub youtube_api_key: String,
    pub youtube_base_url: String,
    pub openai_api_key: Option<String>,
    pub llm_provider: LlmProvider,
    pub openai_model: String,
    pub openai_base_url: String,
    /// Upper bound on the search `maxResults` parameter
    pub max_yt_results: usize,
    /// Upper bound on the number of suggestions returned
    pub max_suggestions: usize,
    /// Timeout applied to every outbound HTTP request
    pub request_timeout: Duration,
    pub rate_limit: RateQuota,
    /// Bearer token required on `/suggest`; `None` disables auth
    pub api_token: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            youtube_api_key: String::new(),
            youtube_base_url: DEFAULT_YOUTUBE_BASE_URL.to_string(),
            openai_api_key: None,
            llm_provider: LlmProvider::OpenAi,
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            max_yt_results: 25,
            max_suggestions: 10,
            request_timeout: Duration::from_secs(10),
            rate_limit: RateQuota::default(),
            api_token: None,
        }
    }
}

impl Settings {
    /// Read settings from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through `lookup`, which maps a variable name to its value.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let llm_provider = match get("LLM_PROVIDER") {
            Some(value) => value.parse::<LlmProvider>().context("Invalid LLM_PROVIDER")?,
            None => defaults.llm_provider,
        };
        let rate_limit = match get("RATE_LIMIT") {
            Some(value) => value.parse::<RateQuota>().context("Invalid RATE_LIMIT")?,
            None => defaults.rate_limit,
        };
        let max_yt_results = match get("MAX_YT_RESULTS") {
            Some(value) => parse_number(&value, "MAX_YT_RESULTS")?,
            None => defaults.max_yt_results,
        };
        let max_suggestions = match get("MAX_SUGGESTIONS") {
            Some(value) => parse_number(&value, "MAX_SUGGESTIONS")?,
            None => defaults.max_suggestions,
        };
        let request_timeout = match get("REQUESTS_TIMEOUT") {
            Some(value) => Duration::from_secs(parse_number(&value, "REQUESTS_TIMEOUT")?),
            None => defaults.request_timeout,
        };

        Ok(Self {
            youtube_api_key: get("YOUTUBE_API_KEY").unwrap_or_default(),
            youtube_base_url: get("YOUTUBE_BASE_URL").unwrap_or(defaults.youtube_base_url),
            openai_api_key: get("OPENAI_API_KEY"),
            llm_provider,
            openai_model: get("OPENAI_MODEL").unwrap_or(defaults.openai_model),
            openai_base_url: get("OPENAI_BASE_URL").unwrap_or(defaults.openai_base_url),
            max_yt_results,
            max_suggestions,
            request_timeout,
            rate_limit,
            api_token: get("API_TOKEN"),
        })
    }
}

fn parse_number<T>(value: &str, name: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse()
        .with_context(|| format!("Invalid {}: '{}'", name, value))
}
