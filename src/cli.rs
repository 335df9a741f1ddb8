//! Command-line interface for strictly_chess.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Chess - terminal chessboard synchronized with a game server
#[derive(Parser, Debug)]
#[command(name = "strictly_chess")]
#[command(about = "Terminal chessboard kept in lockstep with a remote game server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Connect to a game server and play in the terminal
    Play {
        /// WebSocket URL of the game server (overrides config and environment)
        #[arg(long)]
        server_url: Option<String>,

        /// Path to the client config file
        #[arg(short, long, default_value = "strictly_chess.toml")]
        config: PathBuf,

        /// Disable mouse capture (keyboard only)
        #[arg(long)]
        no_mouse: bool,
    },

    /// Load the config file and print the effective settings
    CheckConfig {
        /// Path to the client config file
        #[arg(short, long, default_value = "strictly_chess.toml")]
        config: PathBuf,
    },
}
