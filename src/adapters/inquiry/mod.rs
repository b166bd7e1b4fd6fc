//! Inquiry API Adapters.
//!
//! - `HttpInquiryApi` - reqwest client for the listings backend
//! - `MockInquiryApi` - Configurable mock for testing

mod http_client;
mod mock;

pub use http_client::{HttpInquiryApi, HttpInquiryConfig};
pub use mock::{MockInquiryApi, RecordedInquiry};
