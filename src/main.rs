//! Strictly Chess - Unified CLI
//!
//! Terminal chessboard client for a remote game server.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::path::Path;
use strictly_chess::{ClientConfig, SERVER_URL_ENV};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            server_url,
            config,
            no_mouse,
        } => run_play(&config, server_url, no_mouse).await,
        Command::CheckConfig { config } => run_check_config(&config),
    }
}

/// Resolves the effective config: CLI over environment over file over defaults.
fn resolve_config(path: &Path, server_url: Option<String>) -> Result<ClientConfig> {
    let env_url = std::env::var(SERVER_URL_ENV).ok();
    let config = ClientConfig::load_or_default(path)?.with_overrides(env_url, server_url);
    Ok(config)
}

/// Routes logs to a file so they do not corrupt the terminal UI.
fn init_file_logging(config: &ClientConfig) -> Result<()> {
    let log_file = std::fs::File::create(config.log_file())?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(config.log_filter()))
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized
    Ok(())
}

/// Run the terminal client
#[instrument(skip(server_url))]
async fn run_play(config_path: &Path, server_url: Option<String>, no_mouse: bool) -> Result<()> {
    let config = resolve_config(config_path, server_url)?;
    let config = if no_mouse {
        config.with_mouse(false)
    } else {
        config
    };

    init_file_logging(&config)?;
    info!(server_url = %config.server_url(), "Starting Strictly Chess client");

    strictly_chess::run(&config).await
}

/// Print the effective configuration
fn run_check_config(config_path: &Path) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let config = resolve_config(config_path, None)?;
    println!("# Effective configuration ({})", config_path.display());
    print!("{}", config.to_toml()?);
    Ok(())
}
