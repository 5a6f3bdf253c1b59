//! Noughts - unified CLI
//!
//! Runs the X-0 game server or prints its configuration.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command, Settings};
use noughts_server::{GameServer, ServerConfig};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { settings } => run_server(settings).await,
        Command::Config { settings } => print_config(settings),
    }
}

/// Run the game server
#[instrument(skip_all)]
async fn run_server(settings: Settings) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,noughts_server=debug")),
        )
        .init();

    let config = load_config(&settings)?;
    info!(
        address = %config.bind_address(),
        read_timeout = ?config.read_timeout(),
        "Starting noughts server"
    );

    let server = GameServer::bind(&config).await?;
    server.run().await;

    info!("Server stopped");
    Ok(())
}

/// Print the effective configuration
fn print_config(settings: Settings) -> Result<()> {
    let config = load_config(&settings)?;
    print!("{}", config.to_toml()?);
    Ok(())
}

fn load_config(settings: &Settings) -> Result<ServerConfig> {
    let config = ServerConfig::load(settings.config.as_deref())?;
    Ok(settings.apply(config))
}
