mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gacha=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load()?;
    let games_dir = config.games_dir(cli.games.as_deref());

    match cli.command {
        Commands::Roll {
            game,
            times,
            seed,
            json,
        } => {
            commands::roll::handle(&games_dir, &config, &game, times, seed, json)?;
        }

        Commands::Games => {
            commands::games::list(&games_dir)?;
        }

        Commands::Rates { game, detail } => {
            commands::games::rates(&games_dir, &game, detail)?;
        }

        Commands::Configure {
            games_dir,
            max_pulls,
            default_times,
            show,
        } => {
            commands::configure::handle(games_dir, max_pulls, default_times, show)?;
        }
    }

    Ok(())
}
