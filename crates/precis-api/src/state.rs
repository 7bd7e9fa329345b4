use std::sync::Arc;

use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use std::num::NonZeroU32;
use std::time::Duration;
use tracing::warn;

use precis_core::{GenerationBackend, UsageTable};

use crate::config::{AppConfig, ThrottleConfig};

/// Global rate limiter type (direct quota, not keyed per client).
pub type GlobalRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn GenerationBackend>,
    /// Per-client call counts for the refine endpoint.
    pub usage: Arc<UsageTable>,
    /// Answer refine calls with the canned summary.
    pub test_mode: bool,
    /// Global rate limiter (None if throttling is disabled).
    pub rate_limiter: Option<Arc<GlobalRateLimiter>>,
}

impl AppState {
    pub fn new(backend: Arc<dyn GenerationBackend>, config: &AppConfig) -> Self {
        Self {
            backend,
            usage: Arc::new(UsageTable::new(config.usage_limit)),
            test_mode: config.test_mode,
            rate_limiter: build_rate_limiter(&config.throttle),
        }
    }
}

/// Build the global limiter, or `None` when disabled or misconfigured.
pub fn build_rate_limiter(throttle: &ThrottleConfig) -> Option<Arc<GlobalRateLimiter>> {
    if !throttle.enabled {
        return None;
    }
    let Some(burst) = NonZeroU32::new(throttle.requests) else {
        warn!("RATE_LIMIT_REQUESTS is zero, throttling disabled");
        return None;
    };
    let Some(quota) = Quota::with_period(Duration::from_secs(throttle.period_secs)) else {
        warn!("RATE_LIMIT_PERIOD_SECS is zero, throttling disabled");
        return None;
    };
    Some(Arc::new(RateLimiter::direct(quota.allow_burst(burst))))
}
