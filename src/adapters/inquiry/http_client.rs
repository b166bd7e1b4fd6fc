//! HTTP Inquiry API - Implementation of InquiryApi over the listings backend.
//!
//! # Configuration
//!
//! ```ignore
//! let config = HttpInquiryConfig::new("https://listings.example.com/api")
//!     .with_api_key(api_key)
//!     .with_timeout(Duration::from_secs(10));
//!
//! let api = HttpInquiryApi::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use std::time::Duration;

use crate::domain::conversation::GeneralInquiry;
use crate::domain::foundation::PropertyId;
use crate::ports::{InquiryApi, InquiryApiError, InquiryReceipt};

/// Configuration for the HTTP inquiry client.
#[derive(Debug, Clone)]
pub struct HttpInquiryConfig {
    /// Base URL of the listings API, without trailing slash.
    pub base_url: String,
    api_key: Option<Secret<String>>,
    pub timeout: Duration,
}

impl HttpInquiryConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: None,
            timeout: Duration::from_secs(30),
        }
    }

    /// Sends the key as a bearer token on every request.
    pub fn with_api_key(mut self, api_key: Secret<String>) -> Self {
        self.api_key = Some(api_key);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Body of a listing inquiry. The listing id travels in the path.
#[derive(Debug, Serialize)]
struct PropertyInquiryBody<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
}

/// reqwest-backed inquiry client.
pub struct HttpInquiryApi {
    config: HttpInquiryConfig,
    client: Client,
}

impl HttpInquiryApi {
    pub fn new(config: HttpInquiryConfig) -> Result<Self, InquiryApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| InquiryApiError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn property_inquiry_url(&self, property_id: &PropertyId) -> String {
        format!(
            "{}/properties/{}/inquiries",
            self.config.base_url,
            property_id.as_str()
        )
    }

    fn general_inquiry_url(&self) -> String {
        format!("{}/inquiries", self.config.base_url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.api_key {
            Some(key) => request.header("Authorization", format!("Bearer {}", key.expose_secret())),
            None => request,
        }
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        url: String,
        body: &B,
    ) -> Result<InquiryReceipt, InquiryApiError> {
        let response = self
            .authorize(self.client.post(url))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    InquiryApiError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else if e.is_connect() {
                    InquiryApiError::network(format!("Connection failed: {}", e))
                } else {
                    InquiryApiError::network(e.to_string())
                }
            })?;

        let response = Self::handle_response_status(response).await?;
        response
            .json::<InquiryReceipt>()
            .await
            .map_err(|e| InquiryApiError::InvalidResponse(format!("Failed to parse receipt: {}", e)))
    }

    async fn handle_response_status(response: Response) -> Result<Response, InquiryApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        match status.as_u16() {
            401 | 403 => Err(InquiryApiError::Unauthorized),
            code => Err(InquiryApiError::Status { status: code, body }),
        }
    }
}

#[async_trait]
impl InquiryApi for HttpInquiryApi {
    async fn submit_property_inquiry(
        &self,
        property_id: &PropertyId,
        name: &str,
        email: &str,
        message: &str,
    ) -> Result<InquiryReceipt, InquiryApiError> {
        let body = PropertyInquiryBody {
            name,
            email,
            message,
        };
        self.post(self.property_inquiry_url(property_id), &body).await
    }

    async fn submit_general_inquiry(
        &self,
        inquiry: &GeneralInquiry,
    ) -> Result<InquiryReceipt, InquiryApiError> {
        self.post(self.general_inquiry_url(), inquiry).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder_works() {
        let config = HttpInquiryConfig::new("https://listings.test/api/")
            .with_api_key(Secret::new("k".to_string()))
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.base_url, "https://listings.test/api");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.api_key.is_some());
    }

    #[test]
    fn builds_endpoint_urls() {
        let api = HttpInquiryApi::new(HttpInquiryConfig::new("https://listings.test/api")).unwrap();
        let id: PropertyId = "prop-42".parse().unwrap();

        assert_eq!(
            api.property_inquiry_url(&id),
            "https://listings.test/api/properties/prop-42/inquiries"
        );
        assert_eq!(api.general_inquiry_url(), "https://listings.test/api/inquiries");
    }

    #[test]
    fn property_body_omits_listing_id() {
        let body = PropertyInquiryBody {
            name: "Sara",
            email: "s@x.io",
            message: "hi",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Sara", "email": "s@x.io", "message": "hi"}));
    }

    #[tokio::test]
    async fn unreachable_backend_maps_to_network_error() {
        // Port 9 (discard) on localhost is closed in test environments.
        let api = HttpInquiryApi::new(
            HttpInquiryConfig::new("http://127.0.0.1:9").with_timeout(Duration::from_secs(2)),
        )
        .unwrap();
        let inquiry = GeneralInquiry {
            name: "Sara".to_string(),
            phone: "0501234567".to_string(),
            email: None,
            property_type: None,
            bedroom_count: None,
            property_interest: None,
            message: "hi".to_string(),
        };

        let err = api.submit_general_inquiry(&inquiry).await.unwrap_err();
        assert!(err.is_transient());
    }
}
