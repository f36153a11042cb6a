//! Debate fact-check server binary.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;

use debate_server::claims::AnalysisPipeline;
use debate_server::config::ServerConfig;
use debate_server::events::EventBus;
use debate_server::llm::{GeminiClient, TextGenerator};
use debate_server::server::{self, AppState};
use debate_server::session::SessionCoordinator;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Bind address for the WebSocket server (overrides BIND_ADDR)
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("debate_server=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = ServerConfig::from_env()?;
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }

    tracing::info!(
        bind_addr = %config.bind_addr,
        extraction_model = %config.extraction_model,
        analysis_model = %config.analysis_model,
        "Starting debate fact-check server"
    );

    let generator: Arc<dyn TextGenerator> =
        Arc::new(GeminiClient::new(&config.gemini_api_key, &config.gemini_base_url)?);
    let pipeline = AnalysisPipeline::new(
        generator,
        &config.extraction_model,
        &config.analysis_model,
    );

    let bus = EventBus::new().shared();
    let coordinator = SessionCoordinator::new(pipeline, bus.clone()).shared();

    server::serve(AppState { coordinator, bus }, &config.bind_addr).await
}
