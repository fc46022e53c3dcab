use serde::{Deserialize, Serialize};

use super::error::CompletionError;

/// Role used for the prompt message.
pub const USER_ROLE: &str = "user";

/// A single chat message, shared by requests and responses.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Message {
    pub role: String,
    pub content: String,
}

/// Body of `POST /v1/chat/completions`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
}

impl CompletionRequest {
    /// A request with exactly one user message holding `prompt` verbatim.
    pub fn user(model: &str, prompt: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![Message {
                role: USER_ROLE.to_string(),
                content: prompt.to_string(),
            }],
        }
    }
}

/// The subset of a completion response this client reads.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Choice {
    pub message: Message,
}

impl CompletionResponse {
    /// Content of the first choice, unmodified.
    pub fn into_first_content(self) -> Result<String, CompletionError> {
        self.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(CompletionError::MissingChoice)
    }
}
