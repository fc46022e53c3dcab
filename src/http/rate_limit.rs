//! Rate-limit information carried by `X-Ratelimit-*` response headers.

use log::debug;
use reqwest::header::HeaderMap;
use std::time::Duration;

/// Request quota for the current window.
const RATE_LIMIT_LIMIT_HEADER: &str = "x-ratelimit-limit";
/// Requests left in the current window.
const RATE_LIMIT_REMAINING_HEADER: &str = "x-ratelimit-remaining";
/// Seconds until the window resets.
const RATE_LIMIT_RESET_HEADER: &str = "x-ratelimit-reset";

/// Rate-limit state reported by the server alongside a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitInfo {
    pub limit: u64,
    pub remaining: u64,
    pub reset_seconds: u64,
}

impl RateLimitInfo {
    /// Reads the three rate-limit headers.
    ///
    /// Returns `None` unless all of them are present and hold integers.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let limit = header_u64(headers, RATE_LIMIT_LIMIT_HEADER)?;
        let remaining = header_u64(headers, RATE_LIMIT_REMAINING_HEADER)?;
        let reset_seconds = header_u64(headers, RATE_LIMIT_RESET_HEADER)?;

        Some(Self {
            limit,
            remaining,
            reset_seconds,
        })
    }

    /// True when the quota is used up and the caller has to wait for the reset.
    pub fn must_wait(&self) -> bool {
        self.remaining == 0
    }

    pub fn reset_delay(&self) -> Duration {
        Duration::from_secs(self.reset_seconds)
    }
}

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    let raw = headers.get(name)?;
    let parsed = raw.to_str().ok().and_then(|s| s.trim().parse::<u64>().ok());
    if parsed.is_none() {
        debug!("Ignoring malformed {} header: {:?}", name, raw);
    }
    parsed
}
