//! Homework Bot
//!
//! Watches the homework review API and tells a Telegram chat whenever the
//! review status of the latest submission changes.
//!
//! Architecture:
//! - Configuration: secrets and settings from the environment (or `.env`)
//! - Repositories: review API and chat delivery behind traits
//! - Services: the notification gate deciding what is news
//! - Scheduler: the fixed-interval poll loop

mod config;
mod repository;
mod scheduler;
mod service;

use anyhow::{Context, Result};
use clap::Parser;
use homework_client::{PracticumClient, TelegramClient};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::repository::{HttpReviewRepository, TelegramChatRepository};
use crate::scheduler::{StatusPoller, TokioTimer};

#[derive(Parser)]
#[command(name = "homework-bot")]
#[command(about = "Forwards homework review status changes to Telegram", long_about = None)]
struct Cli {
    /// OAuth token for the review API
    #[arg(long, env = "PRACTICUM_TOKEN", hide_env_values = true)]
    practicum_token: Option<String>,

    /// Telegram bot token
    #[arg(long, env = "TELEGRAM_TOKEN", hide_env_values = true)]
    telegram_token: Option<String>,

    /// Chat that receives the notifications
    #[arg(long, env = "TELEGRAM_CHAT_ID")]
    telegram_chat_id: Option<String>,

    /// Review API endpoint
    #[arg(long, env = "PRACTICUM_ENDPOINT", default_value = config::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Telegram Bot API base URL
    #[arg(long, env = "TELEGRAM_API_URL", default_value = config::DEFAULT_TELEGRAM_API_URL)]
    telegram_api_url: String,

    /// Seconds to sleep between two polls
    #[arg(long, env = "RETRY_PERIOD", default_value_t = config::DEFAULT_RETRY_PERIOD_SECS)]
    retry_period: u64,

    /// Seconds before an HTTP call is abandoned
    #[arg(long, env = "HTTP_TIMEOUT", default_value_t = config::DEFAULT_HTTP_TIMEOUT_SECS)]
    http_timeout: u64,

    /// Run a single poll and exit
    #[arg(long)]
    once: bool,
}

impl Cli {
    fn config(&self) -> Config {
        let secret = |value: &Option<String>| value.clone().unwrap_or_default();

        Config {
            endpoint: self.endpoint.clone(),
            telegram_api_url: self.telegram_api_url.clone(),
            retry_period: Duration::from_secs(self.retry_period),
            http_timeout: Duration::from_secs(self.http_timeout),
            ..Config::new(
                secret(&self.practicum_token),
                secret(&self.telegram_token),
                secret(&self.telegram_chat_id),
            )
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine, the variables may come from the environment
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "homework_bot=info,homework_client=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config();

    if let Err(e) = config.validate() {
        error!(severity = "critical", "Cannot start the bot: {:#}", e);
        std::process::exit(1);
    }
    info!("Loaded configuration: {:?}", config);

    let mut poller = build_poller(&config)?;
    info!("Bot started");

    if cli.once {
        return run_single_poll(&mut poller).await;
    }

    tokio::select! {
        _ = poller.run() => {}
        result = tokio::signal::ctrl_c() => {
            result.context("Failed to listen for shutdown signal")?;
            info!("Shutdown signal received, stopping");
        }
    }

    Ok(())
}

/// Polls once; a failed iteration becomes a non-zero exit
async fn run_single_poll(poller: &mut StatusPoller) -> Result<()> {
    let outcome = poller
        .run_once()
        .await
        .context("Single poll failed")?;
    info!("Single poll finished: {:?}", outcome);
    Ok(())
}

/// Wires the HTTP clients, repositories and timer into a poller
fn build_poller(config: &Config) -> Result<StatusPoller> {
    let http = reqwest::Client::builder()
        .timeout(config.http_timeout)
        .build()
        .context("Failed to build HTTP client")?;

    let practicum =
        PracticumClient::with_client(&config.endpoint, &config.practicum_token, http.clone());
    let telegram =
        TelegramClient::with_client(&config.telegram_api_url, &config.telegram_token, http);

    let review = Arc::new(HttpReviewRepository::new(practicum));
    let chat = Arc::new(TelegramChatRepository::new(
        telegram,
        config.telegram_chat_id.clone(),
    ));

    Ok(StatusPoller::new(
        config.retry_period,
        review,
        chat,
        Arc::new(TokioTimer),
    ))
}
