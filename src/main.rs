//! Sidebase server entry point.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sidebase_provider_gemini::{GeminiProvider, DEFAULT_MODEL};
use sidebase_server::prompt::{PromptStore, ResponseMode};
use sidebase_server::server::{ApiConfig, ApiServer};
use sidebase_server::state::AppState;

/// Sidebase keyword-extraction and streaming-search server.
#[derive(Parser)]
#[command(name = "sidebase")]
#[command(about = "Keyword extraction and streaming sidebar explanations")]
#[command(version)]
struct Cli {
    /// Server host
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Server port
    #[arg(long, default_value_t = 3000)]
    port: u16,

    /// Directory containing the prompt template files
    #[arg(long, default_value = "prompts")]
    prompts: PathBuf,

    /// Sidebar response mode (search or summarize)
    #[arg(long, default_value = "summarize")]
    mode: ResponseMode,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY")]
    api_key: String,

    /// Gemini model name
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let prompts = PromptStore::load(&cli.prompts).await?;
    info!("loaded prompt templates from {}", cli.prompts.display());

    let backend = Arc::new(GeminiProvider::with_model(cli.api_key, cli.model));
    let state = Arc::new(AppState::new(backend, prompts, cli.mode));

    let server = ApiServer::new(ApiConfig::new(cli.host, cli.port), state);
    server
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("server error: {}", e))?;

    Ok(())
}
