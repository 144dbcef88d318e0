mod config;
mod error;
mod platform;
mod server;
mod size;
mod update;
mod webhook;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::platform::telegram::TelegramMessenger;
use crate::webhook::WebhookHandler;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,telegram_drive_bot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if dotenvy::dotenv().is_ok() {
        info!("Loaded environment from .env");
    }

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.toml"));

    info!("Loading configuration from: {}", config_path.display());
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let addr = config.listen_addr()?;
    info!("Configuration loaded successfully");
    info!("  Listen address: {}", addr);
    info!("  Send timeout: {:?}", config.send_timeout());

    let messenger = TelegramMessenger::new(&config.telegram.bot_token, config.send_timeout())?;

    match &config.webhook.public_url {
        Some(url) => messenger.register_webhook(url).await?,
        None => warn!("No public webhook URL configured; assuming it is registered already"),
    }

    let handler = Arc::new(WebhookHandler::new(Arc::new(messenger), config.send_timeout()));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Bot is starting...");
    server::serve(listener, server::router(handler), shutdown_signal()).await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
