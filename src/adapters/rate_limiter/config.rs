//! Rate limit configuration types.

use serde::{Deserialize, Serialize};

/// Route name used for lead submissions.
pub const INQUIRY_RESOURCE: &str = "inquiries";

/// Fixed-window limit: `max_requests` per `window_secs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowLimit {
    pub max_requests: u32,
    pub window_secs: u32,
}

impl WindowLimit {
    pub fn new(max_requests: u32, window_secs: u32) -> Self {
        Self {
            max_requests,
            window_secs,
        }
    }
}

/// Limit on the inquiry route, shared by every conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    pub inquiries: WindowLimit,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self::for_inquiries(5, 3600)
    }
}

impl RateLimitConfig {
    pub fn for_inquiries(max_submissions: u32, window_secs: u32) -> Self {
        Self {
            inquiries: WindowLimit::new(max_submissions, window_secs),
        }
    }

    /// The limit for `route`, if one is configured.
    pub fn route_limit(&self, route: &str) -> Option<WindowLimit> {
        (route == INQUIRY_RESOURCE).then_some(self.inquiries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits_inquiries() {
        let config = RateLimitConfig::default();
        assert_eq!(config.route_limit(INQUIRY_RESOURCE), Some(WindowLimit::new(5, 3600)));
    }

    #[test]
    fn other_routes_have_no_limit() {
        assert_eq!(RateLimitConfig::default().route_limit("listings"), None);
    }

    #[test]
    fn for_inquiries_sets_the_inquiry_limit() {
        let config = RateLimitConfig::for_inquiries(1, 60);
        assert_eq!(config.route_limit(INQUIRY_RESOURCE), Some(WindowLimit::new(1, 60)));
    }
}
