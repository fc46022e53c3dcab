mod ask;
pub mod config;

pub use ask::{ANSWER_PREFIX, ERROR_PREFIX, QUESTION_PROMPT, ask, ask_with_io};
pub use config::{API_KEY_ENV, Config};
