//! Error types for the gacha engine

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GachaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Game definition is unusable (bad rates, unknown guarantee group, zero rules)
    #[error("Invalid game config '{game}': {reason}")]
    Config { game: String, reason: String },

    #[error("Invalid pull count {0}: must be at least 1")]
    InvalidTimes(u32),

    /// Cumulative interval search ran past every group
    #[error("Failed to find member matching seed: {seed}")]
    SeedNotMatched { seed: Decimal },

    #[error("Seed landed in group '{group}' which has no members")]
    EmptyGroupSelected { group: String },

    #[error("Seed sequence is empty")]
    EmptySequence,

    #[error("Seed {0} is outside [0, 1)")]
    SeedOutOfRange(Decimal),

    #[error("Game '{0}' is already registered")]
    DuplicateGame(String),
}

impl GachaError {
    pub(crate) fn config(game: &str, reason: impl Into<String>) -> Self {
        GachaError::Config {
            game: game.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GachaError>;
