//! Chat-completion client.

mod client;
mod error;
mod types;

pub use client::{ChatClient, ClientSettings, DEFAULT_API_URL, DEFAULT_MODEL};
pub use error::CompletionError;
pub use types::{Choice, CompletionRequest, CompletionResponse, Message, USER_ROLE};

use async_trait::async_trait;

/// Turns a prompt into the assistant's answer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Complete: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}
