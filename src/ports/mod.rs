//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `InquiryApi` - Lead intake endpoints of the listings backend
//! - `RateLimiter` - Per-route throttling consulted before submission

mod inquiry_api;
mod rate_limiter;

pub use inquiry_api::{InquiryApi, InquiryApiError, InquiryReceipt};
pub use rate_limiter::{
    RateLimitDenied, RateLimitError, RateLimitKey, RateLimitResult, RateLimitStatus, RateLimiter,
};
