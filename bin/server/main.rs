//! Prompt Relay Server
//!
//! Serves `POST /api/gemini` and `POST /api/openai`.

use anyhow::Result;
use clap::Parser;
use prompt_relay::config::{
    DEFAULT_GEMINI_BASE_URL, DEFAULT_OPENAI_BASE_URL, DEFAULT_TIMEOUT_SECS,
};
use prompt_relay::{run_server, Credentials, Relay, RelayConfig};
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "relay-server")]
#[command(about = "Relays prompts to Gemini and OpenAI")]
struct Args {
    /// Server host
    #[arg(long, default_value = "0.0.0.0", env = "RELAY_HOST")]
    host: String,

    /// Server port
    #[arg(short, long, default_value_t = 5000, env = "RELAY_PORT")]
    port: u16,

    /// Timeout for each provider call, in seconds
    #[arg(
        long,
        default_value_t = DEFAULT_TIMEOUT_SECS,
        env = "RELAY_TIMEOUT_SECS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout_secs: u64,

    /// Gemini API base URL
    #[arg(long, default_value = DEFAULT_GEMINI_BASE_URL, env = "GEMINI_API_BASE")]
    gemini_base_url: String,

    /// OpenAI API base URL
    #[arg(long, default_value = DEFAULT_OPENAI_BASE_URL, env = "OPENAI_API_BASE")]
    openai_base_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("prompt_relay=debug,info")),
        )
        .init();

    let args = Args::parse();

    let config = RelayConfig {
        host: args.host,
        port: args.port,
        timeout: Duration::from_secs(args.timeout_secs),
        gemini_base_url: args.gemini_base_url,
        openai_base_url: args.openai_base_url,
    };
    let credentials = Credentials::from_env();

    info!("Starting prompt relay");
    info!("  Upstream timeout: {}s", args.timeout_secs);
    info!("  Credentials: {:?}", credentials);

    let relay = Relay::new(config, credentials)?;
    run_server(relay).await
}
