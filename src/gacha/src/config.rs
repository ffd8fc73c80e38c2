//! Declarative game definitions
//!
//! A game file is one JSON object describing the rate table of a banner:
//!
//! ```json
//! {
//!   "id": "uma-character",
//!   "name": "Character Gacha",
//!   "rules": { "guaranteeEvery": 10, "guaranteeGroup": "SR", "sessionSize": 10 },
//!   "groups": [
//!     { "name": "SSR", "tier": 1, "rates": 0.03, "pickupRatio": 0.25 },
//!     { "name": "SR", "tier": 2, "rates": 0.18 },
//!     { "name": "R", "tier": 3, "rates": 0.79 }
//!   ],
//!   "membersByGroup": {
//!     "SSR": [{ "name": "Special Week", "pickup": true }, { "name": "Silence Suzuka" }],
//!     "SR": [{ "name": "Gold Ship" }],
//!     "R": [{ "name": "Haru Urara" }]
//!   }
//! }
//! ```
//!
//! Rates are read as exact decimals, never as binary floats.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::{GachaError, Result};

/// Largest deviation from 1 tolerated when summing group rates
pub const RATE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 18);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rules {
    /// Every Nth pull (1-based) is a guaranteed pull, except the first
    pub guarantee_every: u32,
    /// Group that receives the fallen-through probability on guaranteed pulls
    pub guarantee_group: String,
    /// Number of pulls shown together as one session
    pub session_size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupConfig {
    pub name: String,
    /// Rarity rank; lower is rarer
    pub tier: i32,
    pub rates: Decimal,
    /// Share of `rates` reserved for pickup members
    #[serde(default)]
    pub pickup_ratio: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub pickup: bool,
}

impl Member {
    pub fn new(name: impl Into<String>) -> Self {
        Member {
            name: name.into(),
            pickup: false,
        }
    }

    pub fn pickup(name: impl Into<String>) -> Self {
        Member {
            name: name.into(),
            pickup: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    pub id: String,
    pub name: String,
    pub rules: Rules,
    pub groups: Vec<GroupConfig>,
    #[serde(default)]
    pub members_by_group: HashMap<String, Vec<Member>>,
}

impl GameConfig {
    /// Parse a game definition from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a game definition from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Sum of every declared group rate
    pub fn total_rates(&self) -> Decimal {
        self.groups.iter().map(|g| g.rates).sum()
    }

    /// Check the definition for configuration errors.
    ///
    /// Model building does not call this; a table that fails here still builds
    /// but may produce pulls that match no member.
    pub fn validate(&self) -> Result<()> {
        let fail = |reason: String| Err(GachaError::config(&self.id, reason));

        if self.rules.guarantee_every == 0 {
            return fail("guaranteeEvery must be at least 1".into());
        }
        if self.rules.session_size == 0 {
            return fail("sessionSize must be at least 1".into());
        }

        let unit = Decimal::ZERO..=Decimal::ONE;
        for group in &self.groups {
            if !unit.contains(&group.rates) {
                return fail(format!(
                    "group '{}' has rates {} outside [0, 1]",
                    group.name, group.rates
                ));
            }
            if !unit.contains(&group.pickup_ratio) {
                return fail(format!(
                    "group '{}' has pickupRatio {} outside [0, 1]",
                    group.name, group.pickup_ratio
                ));
            }
        }

        if !self.groups.iter().any(|g| g.name == self.rules.guarantee_group) {
            return fail(format!(
                "guaranteeGroup '{}' does not name any group",
                self.rules.guarantee_group
            ));
        }

        let total = self.total_rates();
        if (total - Decimal::ONE).abs() > RATE_TOLERANCE {
            return fail(format!("group rates sum to {} instead of 1", total));
        }

        Ok(())
    }
}
