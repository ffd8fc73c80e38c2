//! Core CLI definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gacha")]
#[command(about = "Gacha simulator", long_about = None)]
pub struct Cli {
    /// Directory of game definitions (overrides configured default)
    #[arg(long, global = true, env = "GACHA_GAMES_DIR")]
    pub games: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Roll a game and show every pull
    #[command(visible_alias = "r")]
    Roll {
        /// Game id or name (e.g. "uma-character")
        game: String,

        /// Number of pulls (uses configured default if not provided)
        times: Option<u32>,

        /// Seed for a reproducible roll
        #[arg(short, long)]
        seed: Option<u64>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List loaded games
    #[command(visible_alias = "l")]
    Games,

    /// Show the rate table of a game
    Rates {
        /// Game id or name
        game: String,

        /// Show every runtime group instead of one row per declared group
        #[arg(short, long)]
        detail: bool,
    },

    /// Configure default settings
    #[command(visible_alias = "c")]
    Configure {
        /// Set default games directory
        #[arg(long)]
        games_dir: Option<PathBuf>,

        /// Set maximum pulls per roll
        #[arg(long)]
        max_pulls: Option<u32>,

        /// Set default number of pulls
        #[arg(long)]
        default_times: Option<u32>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}
