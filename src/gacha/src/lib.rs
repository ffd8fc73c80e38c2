//! # gacha
//!
//! Gacha roll engine - weighted draws over tiered rate tables.
//!
//! This library provides functionality to:
//! - Load declarative game definitions (groups, members, pity rules) from JSON
//! - Build runtime rate tables with pickup splits and guaranteed-pull rates
//! - Roll pulls against a table with exact decimal interval arithmetic
//! - Keep a registry of games loaded from a directory
//!
//! ## Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = gacha::GameConfig::load("share/games/uma-character.json")?;
//! config.validate()?;
//!
//! let model = gacha::GameModel::build(&config);
//! let result = gacha::roll(&model, 10, &mut gacha::RngSource::seeded(7))?;
//!
//! for pull in &result.pulls {
//!     println!("{} {}", pull.group.name, pull.member.name);
//! }
//! match result.top_pull_rates {
//!     Some(rates) => println!("one {} every {} pulls", model.name, rates),
//!     None => println!("no top tier pulls"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod model;
pub mod registry;
pub mod roll;

#[doc(inline)]
pub use config::{GameConfig, GroupConfig, Member, Rules, RATE_TOLERANCE};
#[doc(inline)]
pub use error::GachaError;
#[doc(inline)]
pub use model::{build_model, GameModel, RuntimeGroup, TierSummary};
#[doc(inline)]
pub use registry::{GameRegistry, LoadReport};
#[doc(inline)]
pub use roll::{
    is_guarantee_pull, pick_member, roll, Pull, PulledGroup, RngSource, RollResult, SeedSource,
    SequenceSource,
};

pub use rust_decimal::Decimal;
