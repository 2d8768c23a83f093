//! Chat command bot - Main entry point.
//!
//! Reads newline-delimited JSON chat events from stdin and writes replies to
//! stdout, one JSON document per line.

mod app;
mod config;
mod error;

use crate::config::{Config, LogFormat};
use crate::error::AppResult;
use anyhow::Context;
use chat_events::{EventReceiver, JsonLinesPublisher};
use command_store::{FileRepository, MemoryRepository, UserCommandRepository};
use kv_cache::MemoryCache;
use std::sync::Arc;
use tokio::io::BufReader;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Initialize logging
    init_logging(&config.bot.log_level, config.bot.log_format);

    info!("Starting command bot...");

    let cache = Arc::new(MemoryCache::new(config.cache.sweep_interval));

    let file_repository = if config.store.persist {
        Some(Arc::new(FileRepository::open(&config.store.path).await?))
    } else {
        warn!("User command persistence disabled - commands are lost on restart");
        None
    };
    let repository: Arc<dyn UserCommandRepository> = match &file_repository {
        Some(repository) => repository.clone(),
        None => Arc::new(MemoryRepository::new()),
    };

    let publisher = Arc::new(JsonLinesPublisher::new(tokio::io::stdout()));
    let router = Arc::new(app::build_router(&config, cache, repository, publisher));

    info!(
        "Listening for events on stdin (prefix={:?}, handle_timeout={:?})",
        config.bot.command_prefix, config.bot.handle_timeout
    );

    // Start event receiver
    let receiver = EventReceiver::new(BufReader::new(tokio::io::stdin()));

    // Main event loop
    let in_flight = app::run(
        router,
        receiver.stream(),
        config.bot.handle_timeout,
        signal::ctrl_c(),
    )
    .await;

    info!("Shutting down...");
    app::drain(in_flight, config.bot.shutdown_timeout).await;

    if let Some(repository) = file_repository {
        if let Err(e) = repository.flush().await {
            error!("Failed to flush user commands: {}", e);
            return Err(e.into());
        }
        info!("User commands saved to {:?}", repository.storage_path());
    }

    Ok(())
}

fn init_logging(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    // Logs go to stderr, stdout carries replies
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}
