//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CONCIERGE` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use property_concierge::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Submitting leads to {}", config.inquiry_api.base_url);
//! ```

mod chat;
mod error;
mod inquiry_api;
mod logging;
mod property;
mod rate_limit;

pub use chat::ChatConfig;
pub use error::{ConfigError, ValidationError};
pub use inquiry_api::InquiryApiConfig;
pub use logging::LoggingConfig;
pub use property::PropertyConfig;
pub use rate_limit::RateLimitSettings;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Chat timing and flow
    #[serde(default)]
    pub chat: ChatConfig,

    /// Listings backend that receives the leads
    pub inquiry_api: InquiryApiConfig,

    /// Submission throttling
    #[serde(default)]
    pub rate_limit: RateLimitSettings,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Listing the chat is opened from, if any
    #[serde(default)]
    pub property: Option<PropertyConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CONCIERGE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CONCIERGE__INQUIRY_API__BASE_URL=...` -> `inquiry_api.base_url = ...`
    /// - `CONCIERGE__CHAT__TYPING_DELAY_MS=500` -> `chat.typing_delay_ms = 500`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CONCIERGE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.chat.validate()?;
        self.inquiry_api.validate()?;
        self.rate_limit.validate()?;
        self.logging.validate()?;
        if let Some(property) = &self.property {
            property.validate()?;
        }
        Ok(())
    }
}
