//! Route table and handlers.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::{get, post};
use axum::{Json, Router, middleware};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use catalog::{SearchQuery, SuggestResponse};

use crate::api::error::ApiError;
use crate::auth::auth_middleware;
use crate::rate_limit::rate_limit_middleware;
use crate::state::AppState;

/// Body of `POST /suggest`
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestRequest {
    pub genre: String,
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub era: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub limit: Option<i64>,
}

impl SuggestRequest {
    pub fn into_query(self) -> Result<SearchQuery, ApiError> {
        Ok(SearchQuery::new(
            self.genre,
            self.mood,
            self.era,
            self.language,
            self.limit,
        )?)
    }
}

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
}

/// Build the application router.
///
/// `/suggest` sits behind auth then rate limiting; `/healthz` behind neither.
pub fn router(state: AppState) -> Router {
    let suggest_routes = Router::new()
        .route("/suggest", post(suggest))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/healthz", get(healthz))
        .merge(suggest_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Credentials are checked before the body so a misconfigured service
/// answers 500 regardless of what the client sent.
async fn suggest(
    State(state): State<AppState>,
    payload: Result<Json<SuggestRequest>, JsonRejection>,
) -> Result<Json<SuggestResponse>, ApiError> {
    state.orchestrator.check_credentials()?;

    let Json(request) = payload.map_err(|rejection| ApiError::Validation(rejection.body_text()))?;
    let query = request.into_query()?;

    let response = state.orchestrator.suggest(&query).await?;
    Ok(Json(response))
}
