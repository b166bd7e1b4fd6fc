//! Rate limiting port.
//!
//! The site backend throttles inquiry submissions per route; the dispatcher
//! consults this port before calling the inquiry API. Every caller of a
//! route shares its quota. Implementations can keep counters in memory or
//! in a shared store.

use async_trait::async_trait;

use crate::domain::foundation::Timestamp;

/// Port for rate limiting operations.
///
/// Implementations should be thread-safe and support concurrent access.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Check if a request on the route is allowed, consuming a token if so.
    async fn check(&self, key: RateLimitKey) -> Result<RateLimitResult, RateLimitError>;
}

/// The route being limited, e.g. "inquiries".
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct RateLimitKey {
    pub route: String,
}

impl RateLimitKey {
    /// Creates a key shared by every caller of `route`.
    pub fn route(route: &str) -> Self {
        Self {
            route: route.to_string(),
        }
    }

    /// Returns the storage key string for this rate limit key.
    pub fn storage_key(&self) -> String {
        format!("ratelimit:route:{}", self.route)
    }
}

/// Result of a rate limit check.
#[derive(Debug, Clone)]
pub enum RateLimitResult {
    /// Request is allowed; includes current status.
    Allowed(RateLimitStatus),
    /// Request is denied; includes denial details.
    Denied(RateLimitDenied),
}

impl RateLimitResult {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitResult::Allowed(_))
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, RateLimitResult::Denied(_))
    }
}

/// Quota left after an allowed request.
#[derive(Debug, Clone)]
pub struct RateLimitStatus {
    pub limit: u32,
    pub remaining: u32,
    /// When the current window resets.
    pub reset_at: Timestamp,
}

/// Details of a rate limit denial.
#[derive(Debug, Clone)]
pub struct RateLimitDenied {
    pub limit: u32,
    /// Seconds until the route accepts requests again.
    pub retry_after_secs: u32,
}

/// Errors that can occur during rate limiting operations.
#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    /// Rate limiter backend is unavailable.
    #[error("rate limiter unavailable: {0}")]
    Unavailable(String),

    /// No limit is configured for the route.
    #[error("unknown route: {0}")]
    UnknownRoute(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_key_names_the_route() {
        let key = RateLimitKey::route("inquiries");
        assert_eq!(key.route, "inquiries");
        assert_eq!(key.storage_key(), "ratelimit:route:inquiries");
    }

    #[test]
    fn keys_for_the_same_route_are_equal() {
        assert_eq!(RateLimitKey::route("inquiries"), RateLimitKey::route("inquiries"));
    }

    #[test]
    fn rate_limit_result_predicates() {
        let allowed = RateLimitResult::Allowed(RateLimitStatus {
            limit: 5,
            remaining: 4,
            reset_at: Timestamp::now(),
        });
        assert!(allowed.is_allowed());
        assert!(!allowed.is_denied());

        let denied = RateLimitResult::Denied(RateLimitDenied {
            limit: 5,
            retry_after_secs: 30,
        });
        assert!(denied.is_denied());
    }
}
