//! In-memory rate limiter implementation.
//!
//! Uses a fixed-window counter per route in an in-memory HashMap.
//! Counters are process-local, so multi-server deployments need a shared
//! store behind the same port.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::Timestamp;
use crate::ports::{
    RateLimitDenied, RateLimitError, RateLimitKey, RateLimitResult, RateLimitStatus, RateLimiter,
};

use super::config::RateLimitConfig;

/// In-memory rate limiter for tests and single-process deployments.
///
/// Clones share the same counters.
#[derive(Debug, Clone)]
pub struct InMemoryRateLimiter {
    config: RateLimitConfig,
    windows: Arc<RwLock<HashMap<String, WindowState>>>,
}

#[derive(Debug, Clone)]
struct WindowState {
    count: u32,
    window_start: u64,
}

impl InMemoryRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn now_secs() -> u64 {
        Timestamp::now().as_unix_secs()
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn check(&self, key: RateLimitKey) -> Result<RateLimitResult, RateLimitError> {
        let limit = self
            .config
            .route_limit(&key.route)
            .ok_or_else(|| RateLimitError::UnknownRoute(key.route.clone()))?;
        let now = Self::now_secs();

        let mut windows = self.windows.write().await;

        let state = windows.entry(key.storage_key()).or_insert(WindowState {
            count: 0,
            window_start: now,
        });

        let window_end = state.window_start + limit.window_secs as u64;
        if now >= window_end {
            state.count = 0;
            state.window_start = now;
        }
        let window_end = state.window_start + limit.window_secs as u64;

        if state.count >= limit.max_requests {
            let retry_after = window_end.saturating_sub(now) as u32;
            return Ok(RateLimitResult::Denied(RateLimitDenied {
                limit: limit.max_requests,
                retry_after_secs: retry_after.max(1),
            }));
        }

        state.count += 1;
        Ok(RateLimitResult::Allowed(RateLimitStatus {
            limit: limit.max_requests,
            remaining: limit.max_requests.saturating_sub(state.count),
            reset_at: Timestamp::from_unix_secs(window_end),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::rate_limiter::config::INQUIRY_RESOURCE;

    fn inquiries() -> RateLimitKey {
        RateLimitKey::route(INQUIRY_RESOURCE)
    }

    #[tokio::test]
    async fn allows_requests_within_limit() {
        let limiter = InMemoryRateLimiter::new(RateLimitConfig::for_inquiries(3, 60));

        for i in 0..3 {
            let result = limiter.check(inquiries()).await.unwrap();
            let RateLimitResult::Allowed(status) = result else {
                panic!("request {} should be allowed", i + 1);
            };
            assert_eq!(status.remaining, 2 - i);
        }
    }

    #[tokio::test]
    async fn denies_requests_at_limit() {
        let limiter = InMemoryRateLimiter::new(RateLimitConfig::for_inquiries(2, 60));

        for _ in 0..2 {
            assert!(limiter.check(inquiries()).await.unwrap().is_allowed());
        }

        let RateLimitResult::Denied(denied) = limiter.check(inquiries()).await.unwrap() else {
            panic!("third submission should be denied");
        };
        assert_eq!(denied.limit, 2);
        assert!(denied.retry_after_secs > 0 && denied.retry_after_secs <= 60);
    }

    #[tokio::test]
    async fn clones_share_the_route_quota() {
        let limiter = InMemoryRateLimiter::new(RateLimitConfig::for_inquiries(1, 60));
        let other = limiter.clone();

        assert!(limiter.check(inquiries()).await.unwrap().is_allowed());
        assert!(other.check(inquiries()).await.unwrap().is_denied());
    }

    #[tokio::test]
    async fn unknown_route_is_an_error() {
        let limiter = InMemoryRateLimiter::new(RateLimitConfig::default());

        let result = limiter.check(RateLimitKey::route("listings")).await;

        assert!(matches!(result, Err(RateLimitError::UnknownRoute(route)) if route == "listings"));
    }
}
