//! CLI entrypoint for rivalscope
//!
//! This is the main binary that wires together all layers using
//! dependency injection: Tavily search, the Anthropic completion client,
//! and the in-memory report store are constructed here and handed to the
//! pipeline; nothing holds hidden global state.

use anyhow::{Result, bail};
use clap::Parser;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rivalscope_application::{AnalysisPipeline, EventSink};
use rivalscope_domain::validate_input;
use rivalscope_infrastructure::{
    AnthropicClient, ConfigLoader, InMemoryReportStore, TavilyClient,
};
use rivalscope_presentation::{Cli, ConsoleNarrator, SseStdoutSink};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting rivalscope");

    // Validate input before anything talks to the network.
    let input = cli.to_input();
    let issues = validate_input(&input);
    if !issues.is_empty() {
        for issue in &issues {
            eprintln!("invalid input - {issue}");
        }
        bail!("invalid input");
    }

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!(e))?
    };

    // === Dependency Injection ===
    let search = Arc::new(TavilyClient::from_env()?);
    let model = Arc::new(AnthropicClient::from_env()?);
    let store = Arc::new(InMemoryReportStore::new());

    let pipeline = AnalysisPipeline::new(search, model, Arc::clone(&store), config.pipeline);

    // Ctrl-C propagates as cancellation: in-flight stages stop at their next
    // checkpoint and the stream terminates with an error frame.
    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_token.cancel();
        }
    });

    let sink: Box<dyn EventSink> = if cli.raw {
        Box::new(SseStdoutSink)
    } else {
        Box::new(ConsoleNarrator::new())
    };

    let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
    let outcome = pipeline
        .run(&input, &today, sink.as_ref(), Some(cancel))
        .await?;

    // The event stream already carried the full aggregate; print it again as
    // plain JSON for shell consumption in console mode.
    if !cli.raw {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }

    Ok(())
}
