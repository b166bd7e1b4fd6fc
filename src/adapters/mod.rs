//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the dialogue engine to external systems:
//! - `inquiry` - Listings backend client (HTTP, mock)
//! - `rate_limiter` - Submission throttling (in-memory)

pub mod inquiry;
pub mod rate_limiter;

pub use inquiry::{HttpInquiryApi, HttpInquiryConfig, MockInquiryApi, RecordedInquiry};
pub use rate_limiter::{InMemoryRateLimiter, RateLimitConfig, WindowLimit, INQUIRY_RESOURCE};
