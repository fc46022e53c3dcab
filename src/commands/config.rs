use anyhow::{Context, Result, bail};
use log::debug;

use crate::{
    chat::{ChatClient, ClientSettings, Complete},
    runtime::Runtime,
};

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

pub struct Config<C: Complete> {
    pub completer: C,
}

impl<R: Runtime> Config<ChatClient<R>> {
    /// Builds the authenticated client. An explicit `api_key` wins over
    /// `OPENAI_API_KEY`.
    pub fn new(
        runtime: R,
        api_key: Option<String>,
        api_url: String,
        model: String,
        max_attempts: usize,
    ) -> Result<Self> {
        let api_key = match api_key {
            Some(key) => key,
            None => runtime.env_var(API_KEY_ENV).with_context(|| {
                format!(
                    "No API key given. Pass --api-key or set the {} environment variable.",
                    API_KEY_ENV
                )
            })?,
        };

        if api_key.trim().is_empty() {
            bail!("The API key is empty");
        }

        let settings = ClientSettings {
            api_key,
            api_url,
            model,
            max_attempts,
        };
        debug!("Client settings: {:?}", settings);

        let completer = ChatClient::new(runtime, settings)?;
        Ok(Self { completer })
    }
}
