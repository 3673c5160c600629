//! rxboard - PBM Dashboard CLI
//!
//! Reads claims, members, drugs, pharmacies and analytics reports from the
//! PBM backend and prints them as tables or JSON.

mod cli;
mod commands;
mod config;
mod dashboard;
mod logging;
mod render;
mod reports;

use std::io::Write;

use anyhow::Context;
use clap::Parser;
use rxboard_client::RxClient;

use crate::cli::Cli;
use crate::commands::Output;
use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    logging::init_logging(&config.logging).context("Failed to initialize logging")?;

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        base_url = %config.api.base_url,
        "Configuration loaded"
    );

    let client =
        RxClient::new(&config.api, &config.cache).context("Failed to create backend client")?;

    let output = if cli.json { Output::Json } else { Output::Table };
    let rendered = commands::run(&client, cli.command, output).await?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(rendered.as_bytes())
        .context("Failed to write output")?;
    stdout.flush().context("Failed to write output")?;

    Ok(())
}
