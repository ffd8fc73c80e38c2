//! Game listing and rate table handlers

use anyhow::{bail, Result};
use gacha::GameModel;
use std::path::Path;

use super::roll::percent;

/// List every loaded game
pub fn list(games_dir: &Path) -> Result<()> {
    let registry = super::load_registry(games_dir)?;

    println!("Known games ({}):\n", registry.len());
    println!("{:<20} {:<30} {:>7} {:>10}", "Id", "Name", "Groups", "Guarantee");
    println!("{}", "-".repeat(70));

    for model in registry.iter() {
        println!(
            "{:<20} {:<30} {:>7} {:>10}",
            model.id,
            model.name,
            model.tiers().len(),
            format!("every {}", model.rules.guarantee_every)
        );
    }

    Ok(())
}

/// Show the rate table of one game
pub fn rates(games_dir: &Path, game: &str, detail: bool) -> Result<()> {
    let registry = super::load_registry(games_dir)?;
    let Some(model) = registry.find(game) else {
        bail!("Unknown game '{}'. Try 'gacha games' to see all games", game);
    };

    print!("{}", rate_table(model, detail));
    Ok(())
}

fn rate_table(model: &GameModel, detail: bool) -> String {
    let mut out = format!(
        "{} ({}), guaranteed {} or better every {} pulls\n\n",
        model.name, model.id, model.rules.guarantee_group, model.rules.guarantee_every
    );

    out.push_str(&format!(
        "{:<12} {:>5} {:>8} {:>10} {:>12}\n",
        "Group", "Tier", "Members", "Rate", "Guaranteed"
    ));
    out.push_str(&format!("{}\n", "-".repeat(51)));

    if detail {
        for group in &model.groups {
            let name = if group.pickup {
                format!("{} (pickup)", group.name)
            } else {
                group.name.clone()
            };
            out.push_str(&format!(
                "{:<12} {:>5} {:>8} {:>10} {:>12}\n",
                name,
                group.tier,
                group.members.len(),
                percent(group.rates),
                percent(group.rates_on_guarantee)
            ));
        }
    } else {
        for tier in model.tiers() {
            out.push_str(&format!(
                "{:<12} {:>5} {:>8} {:>10} {:>12}\n",
                tier.name,
                tier.tier,
                tier.members,
                percent(tier.rates),
                percent(tier.rates_on_guarantee)
            ));
        }
    }

    out.push_str(&format!("{}\n", "-".repeat(51)));
    out.push_str(&format!(
        "{:<12} {:>5} {:>8} {:>10} {:>12}\n",
        "Total",
        "",
        "",
        percent(model.total_rates()),
        percent(model.total_rates_on_guarantee())
    ));

    if !model.skipped_groups.is_empty() {
        out.push_str(&format!(
            "\nSkipped groups without members: {}\n",
            model.skipped_groups.join(", ")
        ));
    }

    out
}
