use anyhow::Result;
use clap::Parser;
use chatask::chat::{DEFAULT_API_URL, DEFAULT_MODEL};
use chatask::commands::{Config, ask};
use chatask::http::DEFAULT_MAX_ATTEMPTS;

/// chatask - ask a chat-completion API one question
///
/// Reads a single line from standard input, sends it as the prompt and
/// prints the answer.
///
/// The API key is taken from --api-key or the OPENAI_API_KEY environment variable.
///
/// Examples:
///   echo "What is Rust?" | chatask
///   chatask --model gpt-4o --max-attempts 3
#[derive(Parser, Debug)]
#[command(author, version = env!("CHATASK_VERSION"), about)]
struct Cli {
    /// API key (defaults to the OPENAI_API_KEY environment variable)
    #[arg(long = "api-key", value_name = "KEY")]
    pub api_key: Option<String>,

    /// Chat-completion API base URL
    #[arg(
        long = "api-url",
        env = "OPENAI_API_URL",
        value_name = "URL",
        default_value = DEFAULT_API_URL
    )]
    pub api_url: String,

    /// Model identifier sent with the request
    #[arg(long, env = "CHATASK_MODEL", value_name = "MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Maximum number of attempts per question (rate-limited attempts back off)
    #[arg(
        long = "max-attempts",
        env = "CHATASK_MAX_ATTEMPTS",
        value_name = "N",
        default_value_t = DEFAULT_MAX_ATTEMPTS as u64,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub max_attempts: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = chatask::runtime::RealRuntime;

    let config = Config::new(
        runtime,
        cli.api_key,
        cli.api_url,
        cli.model,
        cli.max_attempts as usize,
    )?;
    ask(&config.completer).await
}
