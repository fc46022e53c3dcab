//! HTTP helpers for the completion call: rate-limit headers and backoff.

mod rate_limit;
mod retry;

pub use rate_limit::RateLimitInfo;
pub use retry::{DEFAULT_MAX_ATTEMPTS, backoff_delay};
