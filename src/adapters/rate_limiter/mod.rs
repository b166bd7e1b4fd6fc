//! Rate limiter adapters.
//!
//! Implementations of the RateLimiter port.
//!
//! ## Usage
//!
//! ```ignore
//! use property_concierge::adapters::rate_limiter::{InMemoryRateLimiter, RateLimitConfig};
//!
//! let limiter = InMemoryRateLimiter::new(RateLimitConfig::for_inquiries(5, 3600));
//! ```

mod config;
mod in_memory;

pub use config::{RateLimitConfig, WindowLimit, INQUIRY_RESOURCE};
pub use in_memory::InMemoryRateLimiter;
