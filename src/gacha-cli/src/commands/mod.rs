//! Command handlers for gacha CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod configure;
pub mod games;
pub mod roll;

use anyhow::{bail, Context, Result};
use gacha::GameRegistry;
use std::path::Path;

/// Load every game under `dir`, failing only when nothing could be loaded
pub fn load_registry(dir: &Path) -> Result<GameRegistry> {
    tracing::debug!(dir = %dir.display(), "Loading games");
    let (registry, report) = GameRegistry::load_dir(dir)
        .with_context(|| format!("Failed to load games from {}", dir.display()))?;

    if registry.is_empty() {
        if report.has_errors() {
            bail!(
                "No usable games in {} ({} failed to load)",
                dir.display(),
                report.failed.len()
            );
        }
        bail!("No games found in {}", dir.display());
    }

    Ok(registry)
}
