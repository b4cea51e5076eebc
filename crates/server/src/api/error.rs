//! Mapping of request failures to HTTP responses.
//!
//! Every error body has the shape `{"detail": "<message>"}`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::{error, warn};

use catalog::QueryError;

use crate::orchestrator::SuggestError;

pub const RATE_LIMIT_DETAIL: &str = "Rate limit exceeded. Please try again later.";
pub const UNAUTHORIZED_DETAIL: &str = "Invalid or missing bearer token";

/// Errors returned by the HTTP handlers and middleware
#[derive(Debug)]
pub enum ApiError {
    Unauthorized,
    RateLimited,
    /// Request body or field validation failed
    Validation(String),
    Suggest(SuggestError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Suggest(SuggestError::MissingCredential(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Suggest(SuggestError::Search(_)) => StatusCode::BAD_GATEWAY,
            ApiError::Suggest(SuggestError::NoCandidates) => StatusCode::NOT_FOUND,
        }
    }

    pub fn detail(&self) -> String {
        match self {
            ApiError::Unauthorized => UNAUTHORIZED_DETAIL.to_string(),
            ApiError::RateLimited => RATE_LIMIT_DETAIL.to_string(),
            ApiError::Validation(message) => message.clone(),
            ApiError::Suggest(err) => err.to_string(),
        }
    }
}

impl From<SuggestError> for ApiError {
    fn from(err: SuggestError) -> Self {
        ApiError::Suggest(err)
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.detail();

        if status.is_server_error() {
            error!("Request failed with {}: {}", status, detail);
        } else {
            warn!("Request rejected with {}: {}", status, detail);
        }

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::Credential;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::RateLimited.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            ApiError::from(QueryError::EmptyGenre).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::from(SuggestError::MissingCredential(Credential::YouTubeApiKey)).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::from(SuggestError::NoCandidates).status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_detail_messages() {
        assert_eq!(ApiError::RateLimited.detail(), RATE_LIMIT_DETAIL);
        assert_eq!(
            ApiError::from(SuggestError::MissingCredential(Credential::OpenAiApiKey)).detail(),
            "OPENAI_API_KEY not configured for LLM rerank"
        );
        assert_eq!(
            ApiError::from(SuggestError::NoCandidates).detail(),
            "No candidates found from YouTube"
        );
    }
}
