//! Runtime rate tables built from game definitions
//!
//! Each declared group becomes two runtime groups: its pickup members and
//! everyone else, each carrying the exact share of the group's rate for
//! normal pulls and for guaranteed pulls.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::{GameConfig, GroupConfig, Member, Rules};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuntimeGroup {
    pub name: String,
    pub tier: i32,
    pub members: Vec<Member>,
    /// True for the pickup half of a declared group
    pub pickup: bool,
    pub rates: Decimal,
    pub rates_on_guarantee: Decimal,
}

impl RuntimeGroup {
    /// Rate used for a pull, depending on whether it is guaranteed
    pub fn effective_rate(&self, guaranteed: bool) -> Decimal {
        if guaranteed {
            self.rates_on_guarantee
        } else {
            self.rates
        }
    }
}

/// Rates of one declared group, pickup and normal halves combined
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierSummary {
    pub name: String,
    pub tier: i32,
    pub members: usize,
    pub pickups: usize,
    pub rates: Decimal,
    pub pickup_rates: Decimal,
    pub rates_on_guarantee: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameModel {
    pub id: String,
    pub name: String,
    pub rules: Rules,
    /// Ordered by ascending tier, pickup half before normal half
    pub groups: Vec<RuntimeGroup>,
    /// Declared groups left out because they had no member list
    pub skipped_groups: Vec<String>,
}

impl GameModel {
    /// Build the runtime model for a game definition.
    ///
    /// The definition is not validated here; see [`GameConfig::validate`].
    pub fn build(config: &GameConfig) -> Self {
        let mut sorted: Vec<&GroupConfig> = config.groups.iter().collect();
        sorted.sort_by_key(|g| g.tier);

        let guarantee_index = sorted
            .iter()
            .position(|g| g.name == config.rules.guarantee_group);

        if guarantee_index.is_none() {
            tracing::warn!(
                game = %config.id,
                group = %config.rules.guarantee_group,
                "Guarantee group not found; guaranteed pulls cannot match any group"
            );
        }

        let mut groups = Vec::with_capacity(sorted.len() * 2);
        let mut skipped_groups = Vec::new();

        for (index, group) in sorted.iter().enumerate() {
            let Some(members) = config.members_by_group.get(&group.name) else {
                tracing::warn!(
                    game = %config.id,
                    group = %group.name,
                    "Group has no member list, skipping"
                );
                skipped_groups.push(group.name.clone());
                continue;
            };

            let rates_on_guarantee = match guarantee_index {
                Some(g) if index < g => group.rates,
                Some(g) if index == g => sorted[index..].iter().map(|g| g.rates).sum(),
                _ => Decimal::ZERO,
            };

            let (pickups, normals): (Vec<Member>, Vec<Member>) =
                members.iter().cloned().partition(|m| m.pickup);

            let pickup_ratio = if pickups.is_empty() {
                Decimal::ZERO
            } else {
                group.pickup_ratio
            };
            let normal_ratio = Decimal::ONE - pickup_ratio;

            groups.push(RuntimeGroup {
                name: group.name.clone(),
                tier: group.tier,
                members: pickups,
                pickup: true,
                rates: group.rates * pickup_ratio,
                rates_on_guarantee: rates_on_guarantee * pickup_ratio,
            });
            groups.push(RuntimeGroup {
                name: group.name.clone(),
                tier: group.tier,
                members: normals,
                pickup: false,
                rates: group.rates * normal_ratio,
                rates_on_guarantee: rates_on_guarantee * normal_ratio,
            });
        }

        GameModel {
            id: config.id.clone(),
            name: config.name.clone(),
            rules: config.rules.clone(),
            groups,
            skipped_groups,
        }
    }

    /// Rarest tier present in the model
    pub fn top_tier(&self) -> Option<i32> {
        self.groups.iter().map(|g| g.tier).min()
    }

    /// Name of the rarest declared group
    pub fn top_group_name(&self) -> Option<&str> {
        self.groups.first().map(|g| g.name.as_str())
    }

    /// Combined normal rate of every group at the top tier
    pub fn nominal_top_rate(&self) -> Decimal {
        match self.top_tier() {
            Some(top) => self
                .groups
                .iter()
                .filter(|g| g.tier == top)
                .map(|g| g.rates)
                .sum(),
            None => Decimal::ZERO,
        }
    }

    pub fn total_rates(&self) -> Decimal {
        self.groups.iter().map(|g| g.rates).sum()
    }

    pub fn total_rates_on_guarantee(&self) -> Decimal {
        self.groups.iter().map(|g| g.rates_on_guarantee).sum()
    }

    /// Per declared group view of the rate table, in tier order
    pub fn tiers(&self) -> Vec<TierSummary> {
        let mut tiers: Vec<TierSummary> = Vec::new();

        for group in &self.groups {
            let index = match tiers.iter().position(|t| t.name == group.name) {
                Some(i) => i,
                None => {
                    tiers.push(TierSummary {
                        name: group.name.clone(),
                        tier: group.tier,
                        members: 0,
                        pickups: 0,
                        rates: Decimal::ZERO,
                        pickup_rates: Decimal::ZERO,
                        rates_on_guarantee: Decimal::ZERO,
                    });
                    tiers.len() - 1
                }
            };

            let summary = &mut tiers[index];
            summary.members += group.members.len();
            summary.rates += group.rates;
            summary.rates_on_guarantee += group.rates_on_guarantee;
            if group.pickup {
                summary.pickups += group.members.len();
                summary.pickup_rates += group.rates;
            }
        }

        tiers
    }
}

/// Build the runtime model for a game definition
pub fn build_model(config: &GameConfig) -> GameModel {
    GameModel::build(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RATE_TOLERANCE;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn group(name: &str, tier: i32, rates: Decimal, pickup_ratio: Decimal) -> GroupConfig {
        GroupConfig {
            name: name.to_string(),
            tier,
            rates,
            pickup_ratio,
        }
    }

    fn test_config() -> GameConfig {
        let mut members_by_group = HashMap::new();
        members_by_group.insert(
            "SSR".to_string(),
            vec![Member::pickup("Pickup"), Member::new("A"), Member::new("B")],
        );
        members_by_group.insert("SR".to_string(), vec![Member::new("C"), Member::new("D")]);
        members_by_group.insert("R".to_string(), vec![Member::new("E")]);

        GameConfig {
            id: "test".to_string(),
            name: "Test".to_string(),
            rules: Rules {
                guarantee_every: 10,
                guarantee_group: "SR".to_string(),
                session_size: 10,
            },
            // Declared out of tier order on purpose
            groups: vec![
                group("R", 3, dec!(0.79), Decimal::ZERO),
                group("SSR", 1, dec!(0.03), dec!(0.5)),
                group("SR", 2, dec!(0.18), dec!(0.3)),
            ],
            members_by_group,
        }
    }

    #[test]
    fn test_groups_sorted_and_split() {
        let model = GameModel::build(&test_config());

        let layout: Vec<(&str, bool, usize)> = model
            .groups
            .iter()
            .map(|g| (g.name.as_str(), g.pickup, g.members.len()))
            .collect();
        assert_eq!(
            layout,
            vec![
                ("SSR", true, 1),
                ("SSR", false, 2),
                ("SR", true, 0),
                ("SR", false, 2),
                ("R", true, 0),
                ("R", false, 1),
            ]
        );
    }

    #[test]
    fn test_input_not_mutated() {
        let config = test_config();
        let before = config.clone();
        let model = build_model(&config);
        assert_eq!(model, GameModel::build(&config));
        assert_eq!(config, before);
        assert_eq!(config.groups[0].name, "R");
    }

    #[test]
    fn test_pickup_split() {
        let model = GameModel::build(&test_config());
        assert_eq!(model.groups[0].rates, dec!(0.015));
        assert_eq!(model.groups[1].rates, dec!(0.015));
    }

    #[test]
    fn test_pickup_ratio_ignored_without_pickups() {
        let model = GameModel::build(&test_config());
        // SR declares a 0.3 pickup ratio but has no pickup members
        assert_eq!(model.groups[2].rates, Decimal::ZERO);
        assert_eq!(model.groups[3].rates, dec!(0.18));
    }

    #[test]
    fn test_normalization_preserves_mass() {
        let model = GameModel::build(&test_config());
        assert!((model.total_rates() - Decimal::ONE).abs() <= RATE_TOLERANCE);
    }

    #[test]
    fn test_guarantee_rates() {
        let model = GameModel::build(&test_config());

        // Rarer than the guarantee group: unchanged
        assert_eq!(model.groups[0].rates_on_guarantee, model.groups[0].rates);
        assert_eq!(model.groups[1].rates_on_guarantee, model.groups[1].rates);
        // Guarantee group absorbs its own rate plus every lesser group
        assert_eq!(model.groups[3].rates_on_guarantee, dec!(0.97));
        // Lesser groups become unreachable
        assert_eq!(model.groups[4].rates_on_guarantee, Decimal::ZERO);
        assert_eq!(model.groups[5].rates_on_guarantee, Decimal::ZERO);

        assert!((model.total_rates_on_guarantee() - Decimal::ONE).abs() <= RATE_TOLERANCE);
    }

    #[test]
    fn test_guarantee_includes_skipped_groups_mass() {
        let mut config = test_config();
        config.members_by_group.remove("R");
        let model = GameModel::build(&config);

        assert_eq!(model.skipped_groups, vec!["R".to_string()]);
        assert_eq!(model.groups.len(), 4);
        // The skipped group's rate still folds into the guarantee group
        assert_eq!(model.groups[3].rates_on_guarantee, dec!(0.97));
    }

    #[test]
    fn test_missing_guarantee_group() {
        let mut config = test_config();
        config.rules.guarantee_group = "UR".to_string();
        let model = GameModel::build(&config);

        assert!(model
            .groups
            .iter()
            .all(|g| g.rates_on_guarantee == Decimal::ZERO));
    }

    #[test]
    fn test_stable_sort_on_equal_tiers() {
        let mut config = test_config();
        config.groups.push(group("R2", 3, Decimal::ZERO, Decimal::ZERO));
        config
            .members_by_group
            .insert("R2".to_string(), vec![Member::new("F")]);
        let model = GameModel::build(&config);

        let names: Vec<&str> = model.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names[4..], ["R", "R", "R2", "R2"]);
    }

    #[test]
    fn test_top_tier_queries() {
        let model = GameModel::build(&test_config());
        assert_eq!(model.top_tier(), Some(1));
        assert_eq!(model.top_group_name(), Some("SSR"));
        assert_eq!(model.nominal_top_rate(), dec!(0.03));
    }

    #[test]
    fn test_tiers_summary() {
        let model = GameModel::build(&test_config());
        let tiers = model.tiers();

        assert_eq!(tiers.len(), 3);
        assert_eq!(tiers[0].name, "SSR");
        assert_eq!(tiers[0].members, 3);
        assert_eq!(tiers[0].pickups, 1);
        assert_eq!(tiers[0].rates, dec!(0.03));
        assert_eq!(tiers[0].pickup_rates, dec!(0.015));
        assert_eq!(tiers[1].rates_on_guarantee, dec!(0.97));
        assert_eq!(tiers[2].rates_on_guarantee, Decimal::ZERO);
    }
}
