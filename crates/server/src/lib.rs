//! Server crate for the tunescout suggestion service.
//!
//! This crate contains the orchestrator that coordinates search,
//! re-ranking and filtering, plus the axum HTTP layer in front of it:
//! - `POST /suggest` behind bearer auth and per-client rate limiting
//! - `GET /healthz`

pub mod api;
pub mod auth;
pub mod config;
pub mod orchestrator;
pub mod rate_limit;
pub mod state;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{debug, info};

pub use api::{ApiError, SuggestRequest, router};
pub use config::{LlmProvider, RateQuota, Settings};
pub use orchestrator::{Credential, SuggestError, SuggestOrchestrator};
pub use rate_limit::RateLimiter;
pub use state::AppState;

/// Serve the application on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr().context("Failed to read local address")?;
    info!("Listening on http://{}", addr);

    let pruner = spawn_limiter_pruner(state.limiter.clone(), state.settings.rate_limit.window);
    let served = axum::serve(
        listener,
        router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await;
    pruner.abort();
    served.context("Server error")?;

    info!("Server shut down gracefully");
    Ok(())
}

/// Drop idle clients from `limiter` once per `window`.
fn spawn_limiter_pruner(limiter: Arc<RateLimiter>, window: Duration) -> JoinHandle<()> {
    let period = window.max(Duration::from_secs(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            limiter.prune();
            debug!("Rate limiter tracking {} clients", limiter.tracked_clients());
        }
    })
}
