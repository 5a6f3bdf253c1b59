//! Command-line interface for the noughts server.

use clap::{Parser, Subcommand};
use noughts_server::ServerConfig;
use std::path::PathBuf;

/// Noughts - two-player X-0 over a plain text socket
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Pairs players and runs X-0 games over TCP", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the game server until Ctrl+C
    Serve {
        #[command(flatten)]
        settings: Settings,
    },

    /// Print the effective configuration as TOML
    Config {
        #[command(flatten)]
        settings: Settings,
    },
}

/// Configuration flags shared by every command.
#[derive(clap::Args, Debug)]
pub struct Settings {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Seconds to wait for a move before aborting the game (0 = forever)
    #[arg(long)]
    pub read_timeout: Option<u64>,
}

impl Settings {
    /// Applies command-line flags over `config`.
    pub fn apply(&self, mut config: ServerConfig) -> ServerConfig {
        if let Some(host) = &self.host {
            config = config.with_host(host.clone());
        }
        if let Some(port) = self.port {
            config = config.with_port(port);
        }
        if let Some(secs) = self.read_timeout {
            config = config.with_read_timeout_secs(Some(secs));
        }
        config
    }
}
