//! Crewline - Multi-Agent Workflow Runner
//!
//! CLI entry point for the content, support and travel crews.

#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

mod app;
mod cli;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let config = app::load_config()?;

    let file_writer = config.logging.directory.as_ref().map(|dir| {
        tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, "crewline.log"))
    });
    let (file_layer, _guard) = match file_writer {
        Some((writer, guard)) => (
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(writer)
                    .boxed(),
            ),
            Some(guard),
        ),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.app.default_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    let cli = cli::Cli::parse();

    if cli.command.is_some() {
        info!("Starting Crewline v{}", env!("CARGO_PKG_VERSION"));
        debug!(provider = %config.llm.provider, "Configuration loaded");
    }

    cli::run(cli, config).await
}
