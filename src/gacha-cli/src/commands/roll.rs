//! Roll command handler

use anyhow::{bail, Context, Result};
use gacha::{Decimal, GameModel, Pull, RngSource, RollResult};
use std::path::Path;

use crate::config::Config;

/// Handle the roll command
pub fn handle(
    games_dir: &Path,
    config: &Config,
    game: &str,
    times: Option<u32>,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let times = check_times(times.unwrap_or_else(|| config.default_times()), config.max_pulls())?;

    let registry = super::load_registry(games_dir)?;
    let Some(model) = registry.find(game) else {
        let known: Vec<&str> = registry.ids().collect();
        bail!("Unknown game '{}'. Available: {}", game, known.join(", "));
    };

    let mut source = match seed {
        Some(seed) => {
            tracing::debug!(seed, "Using fixed seed");
            RngSource::seeded(seed)
        }
        None => RngSource::from_entropy(),
    };
    let result = gacha::roll(model, times, &mut source)
        .with_context(|| format!("Failed to roll {}", model.name))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("{}", title(model, times, &result));
    println!();
    print!("{}", render_sessions(model, &result));

    Ok(())
}

fn check_times(times: u32, max_pulls: u32) -> Result<u32> {
    if times == 0 {
        bail!("Pull count must be at least 1");
    }
    if times > max_pulls {
        bail!("Rolls are limited to {} pulls", max_pulls);
    }
    Ok(times)
}

/// Headline comparing the roll against the nominal top tier rate
fn title(model: &GameModel, times: u32, result: &RollResult) -> String {
    let times_text = if times == 1 {
        "single pull".to_string()
    } else {
        format!("{}-pull", times)
    };
    let top_name = model.top_group_name().unwrap_or("top tier");

    let outcome = match result.top_pull_rates {
        None => "lost all motivation...".to_string(),
        Some(_) => {
            let mark = if result.realized_top_rate() > model.nominal_top_rate() {
                "!"
            } else {
                "?"
            };
            format!("got {} {}{}", result.top_pull_count, top_name, mark)
        }
    };

    format!("{} {}: {}", model.name, times_text, outcome)
}

fn render_pull(model: &GameModel, pull: &Pull) -> String {
    let text = format!("{} {}", pull.group.name, pull.member.name);
    let top = model.top_tier();

    let styled = match top {
        Some(t) if pull.group.tier == t => format!("__**{}**__", text),
        Some(t) if t.checked_add(1) == Some(pull.group.tier) => format!("**{}**", text),
        _ => text,
    };

    if pull.guaranteed {
        format!("{} (guaranteed)", styled)
    } else {
        styled
    }
}

/// Pulls grouped by session, each headed by its running pull count
fn render_sessions(model: &GameModel, result: &RollResult) -> String {
    let size = model.rules.session_size;
    let mut out = String::new();

    for (index, session) in result.sessions(size).enumerate() {
        let through = index * size as usize + session.len();
        out.push_str(&format!("[{} pulls]\n", through));
        for pull in session {
            out.push_str("  ");
            out.push_str(&render_pull(model, pull));
            out.push('\n');
        }
    }

    out
}

/// Rate as a percentage, trimmed for display
pub fn percent(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).round_dp(4).normalize())
}
