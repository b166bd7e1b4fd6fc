//! Submission rate limit configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::adapters::rate_limiter::RateLimitConfig;

/// Throttling for inquiry submissions, shared by every conversation
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitSettings {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Submissions allowed per window
    #[serde(default = "default_max_submissions")]
    pub max_submissions: u32,

    #[serde(default = "default_window")]
    pub window_secs: u32,
}

impl RateLimitSettings {
    pub fn limiter_config(&self) -> RateLimitConfig {
        RateLimitConfig::for_inquiries(self.max_submissions, self.window_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.enabled && (self.max_submissions == 0 || self.window_secs == 0) {
            return Err(ValidationError::InvalidRateLimit);
        }
        Ok(())
    }
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_submissions: default_max_submissions(),
            window_secs: default_window(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_max_submissions() -> u32 {
    5
}

fn default_window() -> u32 {
    3600
}
