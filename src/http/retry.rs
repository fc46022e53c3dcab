//! Retry budget and backoff schedule.

use std::time::Duration;

/// Attempts made per completion when nothing else is configured.
pub const DEFAULT_MAX_ATTEMPTS: usize = 1;

/// Exponential backoff: `2^attempt` seconds, `attempt` counting from 0.
/// No jitter and no cap; saturates instead of overflowing.
pub fn backoff_delay(attempt: u32) -> Duration {
    let secs = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
    Duration::from_secs(secs)
}
