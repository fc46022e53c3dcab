//! Runtime abstraction for process-level side effects.
//!
//! The chat client never reads the environment or sleeps directly; it goes
//! through [`Runtime`] so tests can inject a mock and observe every wait.
//!
//! # Structure
//!
//! - `env` - Environment variable lookup
//! - `time` - Suspension (rate-limit waits and backoff)

mod env;
mod time;

use async_trait::async_trait;
use std::env as std_env;
use std::time::Duration;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Runtime: Send + Sync {
    // Environment
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError>;

    // Time
    /// Suspend the current task for `duration`.
    async fn sleep(&self, duration: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RealRuntime;

#[async_trait]
impl Runtime for RealRuntime {
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError> {
        self.env_var_impl(key)
    }

    async fn sleep(&self, duration: Duration) {
        self.sleep_impl(duration).await
    }
}
