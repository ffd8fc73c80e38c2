//! Configuration management for the gacha CLI

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Games shipped with the repository
pub const DEFAULT_GAMES_DIR: &str = "share/games";
/// Largest pull count accepted per roll
pub const DEFAULT_MAX_PULLS: u32 = 60;
pub const DEFAULT_TIMES: u32 = 10;

#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    pub games_dir: Option<PathBuf>,
    pub max_pulls: Option<u32>,
    pub default_times: Option<u32>,
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("gacha");

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from file, or create default if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        toml::from_str(&contents).context("Failed to parse config file")
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory at {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, contents)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        Ok(())
    }

    /// Games directory: explicit override, then config, then the bundled games
    pub fn games_dir(&self, cli_override: Option<&Path>) -> PathBuf {
        cli_override
            .map(Path::to_path_buf)
            .or_else(|| self.games_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_GAMES_DIR))
    }

    pub fn max_pulls(&self) -> u32 {
        self.max_pulls.unwrap_or(DEFAULT_MAX_PULLS)
    }

    pub fn default_times(&self) -> u32 {
        self.default_times.unwrap_or(DEFAULT_TIMES)
    }
}
