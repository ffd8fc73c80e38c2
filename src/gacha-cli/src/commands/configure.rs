//! Configuration command handlers
//!
//! Handles the `configure` subcommand for setting up gacha CLI defaults.

use crate::config::Config;
use anyhow::{bail, Result};
use std::path::PathBuf;

/// Handle the configure command
///
/// # Arguments
/// * `games_dir` - Optional default games directory
/// * `max_pulls` - Optional maximum pulls per roll
/// * `default_times` - Optional default pull count
/// * `show` - If true, show current configuration
pub fn handle(
    games_dir: Option<PathBuf>,
    max_pulls: Option<u32>,
    default_times: Option<u32>,
    show: bool,
) -> Result<()> {
    let mut config = Config::load()?;

    if show {
        show_config(&config);
        return Ok(());
    }

    if games_dir.is_none() && max_pulls.is_none() && default_times.is_none() {
        show_usage();
        return Ok(());
    }

    apply(&mut config, games_dir, max_pulls, default_times)?;
    config.save()?;

    println!("Configuration updated");
    if let Ok(path) = Config::config_path() {
        println!("Config saved to: {}", path.display());
    }

    Ok(())
}

/// Apply requested changes, rejecting counts that could never roll
fn apply(
    config: &mut Config,
    games_dir: Option<PathBuf>,
    max_pulls: Option<u32>,
    default_times: Option<u32>,
) -> Result<()> {
    if max_pulls == Some(0) || default_times == Some(0) {
        bail!("Pull counts must be at least 1");
    }

    if let Some(dir) = games_dir {
        config.games_dir = Some(dir);
    }
    if let Some(max) = max_pulls {
        config.max_pulls = Some(max);
    }
    if let Some(times) = default_times {
        config.default_times = Some(times);
    }

    if config.default_times() > config.max_pulls() {
        bail!(
            "Default pulls ({}) exceed maximum pulls ({})",
            config.default_times(),
            config.max_pulls()
        );
    }

    Ok(())
}

/// Display current configuration
fn show_config(config: &Config) {
    println!("Games directory: {}", config.games_dir(None).display());
    println!("Maximum pulls:   {}", config.max_pulls());
    println!("Default pulls:   {}", config.default_times());

    if let Ok(path) = Config::config_path() {
        println!("Config file: {}", path.display());
    }
}

/// Show usage help for the configure command
fn show_usage() {
    println!("Usage: gacha configure [--games-dir DIR] [--max-pulls N] [--default-times N]");
    println!("   or: gacha configure --show");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_sets_values() {
        let mut config = Config::default();
        apply(&mut config, Some(PathBuf::from("games")), Some(200), Some(20)).unwrap();
        assert_eq!(config.games_dir, Some(PathBuf::from("games")));
        assert_eq!(config.max_pulls(), 200);
        assert_eq!(config.default_times(), 20);
    }

    #[test]
    fn test_apply_rejects_zero() {
        let mut config = Config::default();
        assert!(apply(&mut config, None, Some(0), None).is_err());
        assert!(apply(&mut config, None, None, Some(0)).is_err());
    }

    #[test]
    fn test_apply_rejects_default_above_max() {
        let mut config = Config::default();
        assert!(apply(&mut config, None, Some(5), None).is_err());
    }

    #[test]
    fn test_show_usage_does_not_panic() {
        show_usage();
    }
}
