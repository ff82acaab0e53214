//! Scout a single URL from the command line.
//!
//! Usage:
//!   scout-once https://example.org/event
//!   scout-once https://example.org/event --submit
//!   scout-once https://example.org/event --fetch-only

use anyhow::{Context, Result};
use clap::Parser;
use scout_core::{
    domains::scouting::{extract_event, parse_target_url},
    kernel::{BaseAuditService, BaseWebScraper, ServerDeps},
    Config,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "scout-once")]
#[command(about = "Extract one Berlin cultural event record from a web page")]
struct Cli {
    /// Page to scout
    url: String,

    /// Also hand the validated record to the audit service
    #[arg(long, conflicts_with = "fetch_only")]
    submit: bool,

    /// Only fetch and sanitize the page; skip the agent
    #[arg(long)]
    fetch_only: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,scout_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;
    let deps = ServerDeps::from_config(&config)?;

    let url = parse_target_url(&cli.url)?;

    if cli.fetch_only {
        let result = deps.scraper.fetch(url.as_str()).await;
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let record = extract_event(url.as_str(), &deps).await?;
    println!("{}", serde_json::to_string_pretty(&record)?);

    if cli.submit {
        let response = deps
            .audit
            .submit(&record)
            .await
            .context("Audit handoff failed")?;
        println!("{}", serde_json::to_string_pretty(&response)?);
    }

    Ok(())
}
