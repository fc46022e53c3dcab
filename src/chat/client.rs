//! HTTP implementation of [`Complete`] with rate-limit-aware retry.

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{
    Client, StatusCode,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};
use std::sync::atomic::{AtomicU64, Ordering};

use super::Complete;
use super::error::CompletionError;
use super::types::{CompletionRequest, CompletionResponse};
use crate::http::{DEFAULT_MAX_ATTEMPTS, RateLimitInfo, backoff_delay};
use crate::runtime::Runtime;

pub const DEFAULT_API_URL: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

const COMPLETIONS_PATH: &str = "/v1/chat/completions";
const USER_AGENT: &str = concat!("chatask/", env!("CHATASK_VERSION"));

/// Everything needed to build a [`ChatClient`].
#[derive(Clone)]
pub struct ClientSettings {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
    pub max_attempts: usize,
}

impl ClientSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl std::fmt::Debug for ClientSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientSettings")
            .field("api_key", &mask_key(&self.api_key))
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("max_attempts", &self.max_attempts)
            .finish()
    }
}

/// Chat-completion client. One `reqwest::Client` per instance, reused for
/// every attempt.
pub struct ChatClient<R: Runtime> {
    runtime: R,
    client: Client,
    endpoint: String,
    model: String,
    max_attempts: usize,
    request_count: AtomicU64,
}

impl<R: Runtime> ChatClient<R> {
    #[tracing::instrument(skip(runtime))]
    pub fn new(runtime: R, settings: ClientSettings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", settings.api_key))
            .context("API key contains characters not allowed in an HTTP header")?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);
        debug!("Using API key {}", mask_key(&settings.api_key));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        let max_attempts = if settings.max_attempts == 0 {
            warn!("max_attempts must be at least 1, using 1");
            1
        } else {
            settings.max_attempts
        };

        Ok(Self {
            runtime,
            client,
            endpoint: format!(
                "{}{}",
                settings.api_url.trim_end_matches('/'),
                COMPLETIONS_PATH
            ),
            model: settings.model,
            max_attempts,
            request_count: AtomicU64::new(0),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Number of attempts this instance has made so far.
    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }

    /// One POST to the completions endpoint, without retry.
    async fn send_once(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(CompletionError::Transport)?;

        let status = response.status();

        if status.is_success() {
            let body = response.text().await.map_err(CompletionError::Transport)?;
            let parsed: CompletionResponse =
                serde_json::from_str(&body).map_err(CompletionError::Decode)?;
            return parsed.into_first_content();
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(CompletionError::RateLimited {
                rate_limit: RateLimitInfo::from_headers(response.headers()),
            });
        }

        let body = response.text().await.map_err(CompletionError::Transport)?;
        Err(CompletionError::Http {
            status: status.as_u16(),
            body,
        })
    }

    /// Waits out an exhausted quota, then applies exponential backoff.
    async fn wait_after_rate_limit(&self, rate_limit: Option<&RateLimitInfo>, attempt: usize) {
        if let Some(info) = rate_limit.filter(|info| info.must_wait()) {
            warn!(
                "Rate limit exhausted. Waiting for {} seconds.",
                info.reset_seconds
            );
            self.runtime.sleep(info.reset_delay()).await;
        }

        let delay = backoff_delay(u32::try_from(attempt).unwrap_or(u32::MAX));
        info!("Waiting for {}ms before retrying...", delay.as_millis());
        self.runtime.sleep(delay).await;
    }
}

#[async_trait]
impl<R: Runtime> Complete for ChatClient<R> {
    #[tracing::instrument(skip(self, prompt))]
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let request = CompletionRequest::user(&self.model, prompt);
        let mut last_error = None;

        for attempt in 0..self.max_attempts {
            let count = self.request_count.fetch_add(1, Ordering::Relaxed) + 1;
            info!(
                "Attempt {}/{}, request count: {}",
                attempt + 1,
                self.max_attempts,
                count
            );

            let err = match self.send_once(&request).await {
                Ok(content) => return Ok(content),
                Err(e) if !e.is_retryable() => return Err(e),
                Err(e) => e,
            };

            let has_next = attempt + 1 < self.max_attempts;

            match &err {
                CompletionError::RateLimited { rate_limit } => {
                    match rate_limit {
                        Some(info) => warn!(
                            "Rate limit exceeded (limit: {}, remaining: {}, reset in: {} seconds)",
                            info.limit, info.remaining, info.reset_seconds
                        ),
                        None => warn!("Rate limit exceeded"),
                    }
                    if has_next {
                        self.wait_after_rate_limit(rate_limit.as_ref(), attempt)
                            .await;
                    }
                }
                CompletionError::Http { status, body } => {
                    warn!("HTTP error {}: {}", status, body);
                }
                other => warn!("Attempt {} failed: {}", attempt + 1, other),
            }

            last_error = Some(Box::new(err));
        }

        warn!("Max retry attempts exceeded. Please try again later.");
        Err(CompletionError::MaxRetriesExceeded {
            attempts: self.max_attempts,
            last: last_error,
        })
    }
}

/// `sk-abcdefghijklmnop` -> `sk-a*********mnop`
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*********".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}*********{}", head, tail)
}
