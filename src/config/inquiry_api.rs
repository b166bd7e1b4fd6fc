//! Inquiry API (listings backend) configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::inquiry::HttpInquiryConfig;

/// Listings backend connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct InquiryApiConfig {
    /// Base URL, e.g. `https://listings.example.com/api`
    pub base_url: String,

    /// Bearer token for the intake endpoints
    pub api_key: Option<Secret<String>>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl InquiryApiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().is_empty())
    }

    /// Builds the HTTP adapter configuration
    pub fn client_config(&self) -> HttpInquiryConfig {
        let config = HttpInquiryConfig::new(&self.base_url).with_timeout(self.timeout());
        match &self.api_key {
            Some(key) if self.has_api_key() => config.with_api_key(key.clone()),
            _ => config,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_url.is_empty() {
            return Err(ValidationError::MissingRequired("INQUIRY_API__BASE_URL"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidApiUrl);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn default_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> InquiryApiConfig {
        InquiryApiConfig {
            base_url: base_url.to_string(),
            api_key: None,
            timeout_secs: default_timeout(),
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(config("https://listings.example.com/api").validate().is_ok());
        assert!(config("http://localhost:8080").validate().is_ok());
    }

    #[test]
    fn test_invalid_url() {
        assert_eq!(
            config("listings.example.com").validate(),
            Err(ValidationError::InvalidApiUrl)
        );
        assert_eq!(
            config("").validate(),
            Err(ValidationError::MissingRequired("INQUIRY_API__BASE_URL"))
        );
    }

    #[test]
    fn test_invalid_timeout() {
        let mut cfg = config("https://listings.example.com");
        cfg.timeout_secs = 0;
        assert_eq!(cfg.validate(), Err(ValidationError::InvalidTimeout));
    }

    #[test]
    fn test_client_config() {
        let mut cfg = config("https://listings.example.com/api/");
        cfg.timeout_secs = 5;
        cfg.api_key = Some(Secret::new("key".to_string()));
        let client = cfg.client_config();
        assert_eq!(client.base_url, "https://listings.example.com/api");
        assert_eq!(client.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_empty_api_key_is_ignored() {
        let mut cfg = config("https://listings.example.com");
        cfg.api_key = Some(Secret::new(String::new()));
        assert!(!cfg.has_api_key());
    }
}
