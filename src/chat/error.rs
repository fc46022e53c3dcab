//! Typed failures of a completion call.

use crate::http::RateLimitInfo;

/// Errors produced by [`super::Complete::complete`].
///
/// Only `MaxRetriesExceeded` and `MissingChoice` reach the caller; the other
/// kinds describe a single failed attempt and end up as the `source()` of
/// `MaxRetriesExceeded`.
#[derive(Debug)]
pub enum CompletionError {
    /// Network or connection failure while sending or reading.
    Transport(reqwest::Error),
    /// A success response whose body was not valid completion JSON.
    Decode(serde_json::Error),
    /// HTTP 429, with the rate-limit headers when the server sent them.
    RateLimited { rate_limit: Option<RateLimitInfo> },
    /// Any other non-success HTTP status.
    Http { status: u16, body: String },
    /// A success response without any choice.
    MissingChoice,
    /// The attempt budget ran out without a successful response.
    MaxRetriesExceeded {
        attempts: usize,
        last: Option<Box<CompletionError>>,
    },
}

impl CompletionError {
    /// Whether a later attempt could succeed after this error.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            CompletionError::MissingChoice | CompletionError::MaxRetriesExceeded { .. }
        )
    }
}

impl std::fmt::Display for CompletionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompletionError::Transport(e) => write!(f, "Transport error: {}", e),
            CompletionError::Decode(e) => write!(f, "Failed to parse completion response: {}", e),
            CompletionError::RateLimited { rate_limit: None } => {
                write!(f, "Rate limit exceeded")
            }
            CompletionError::RateLimited {
                rate_limit: Some(info),
            } => write!(
                f,
                "Rate limit exceeded (limit: {}, remaining: {}, reset in: {}s)",
                info.limit, info.remaining, info.reset_seconds
            ),
            CompletionError::Http { status, body } => {
                write!(f, "HTTP error {}: {}", status, body)
            }
            CompletionError::MissingChoice => {
                write!(f, "Completion response contained no choices")
            }
            CompletionError::MaxRetriesExceeded { attempts, .. } => write!(
                f,
                "Max retry attempts exceeded ({}). Failed to get a response from the API.",
                attempts
            ),
        }
    }
}

impl std::error::Error for CompletionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompletionError::Transport(e) => Some(e),
            CompletionError::Decode(e) => Some(e),
            CompletionError::MaxRetriesExceeded {
                last: Some(last), ..
            } => Some(last.as_ref()),
            _ => None,
        }
    }
}
