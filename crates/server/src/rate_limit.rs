//! Per-client rate limiting keyed by client address.
//!
//! Each client gets a burst of `max_requests`, refilled one request every
//! `window / max_requests`.

use std::net::SocketAddr;
use std::num::NonZeroU32;

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use governor::Quota;
use governor::clock::DefaultClock;
use governor::state::keyed::DefaultKeyedStateStore;
use tracing::debug;

use crate::api::ApiError;
use crate::config::RateQuota;
use crate::state::AppState;

/// Key used when the peer address is unknown (e.g. in-process requests)
pub const UNKNOWN_CLIENT: &str = "unknown";

type KeyedLimiter = governor::RateLimiter<String, DefaultKeyedStateStore<String>, DefaultClock>;

/// Per-client request budget.
pub struct RateLimiter {
    limiter: KeyedLimiter,
}

impl RateLimiter {
    pub fn new(quota: RateQuota) -> Self {
        Self {
            limiter: KeyedLimiter::keyed(governor_quota(quota)),
        }
    }

    /// Count one request from `client`; false once its quota is spent
    pub fn check(&self, client: &str) -> bool {
        self.limiter.check_key(&client.to_string()).is_ok()
    }

    /// Forget clients whose budget has fully refilled
    pub fn prune(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }

    /// Number of clients currently tracked
    pub fn tracked_clients(&self) -> usize {
        self.limiter.len()
    }
}

fn governor_quota(quota: RateQuota) -> Quota {
    let burst = NonZeroU32::new(quota.max_requests).unwrap_or(NonZeroU32::MIN);
    Quota::with_period(quota.window / burst.get())
        .map(|q| q.allow_burst(burst))
        .unwrap_or_else(|| Quota::per_second(burst))
}

/// Reject requests beyond the configured quota with 429.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string());

    if !state.limiter.check(&client) {
        debug!("Rate limit exceeded for client {}", client);
        return Err(ApiError::RateLimited);
    }
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_quota_is_enforced_per_client() {
        let limiter = RateLimiter::new(RateQuota::per_minute(2));

        assert!(limiter.check("10.0.0.1"));
        assert!(limiter.check("10.0.0.1"));
        assert!(!limiter.check("10.0.0.1"));

        assert!(limiter.check("10.0.0.2"), "Other clients have their own budget");
    }

    #[test]
    fn test_budget_refills_after_window() {
        let limiter = RateLimiter::new(RateQuota::new(1, Duration::from_millis(50)));

        assert!(limiter.check("client"));
        assert!(!limiter.check("client"));

        thread::sleep(Duration::from_millis(80));
        assert!(limiter.check("client"));
    }

    #[test]
    fn test_refilled_clients_are_pruned() {
        let limiter = RateLimiter::new(RateQuota::new(1, Duration::from_millis(20)));

        for i in 0..100 {
            limiter.check(&format!("client-{i}"));
        }
        assert_eq!(limiter.tracked_clients(), 100);

        thread::sleep(Duration::from_millis(50));
        limiter.prune();
        assert_eq!(limiter.tracked_clients(), 0);
    }

    #[test]
    fn test_period_is_split_across_burst() {
        let quota = governor_quota(RateQuota::per_minute(10));
        assert_eq!(quota.burst_size().get(), 10);
        assert_eq!(quota.replenish_interval(), Duration::from_secs(6));
    }
}
