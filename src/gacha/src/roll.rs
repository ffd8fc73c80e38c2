//! Weighted draws over a runtime rate table
//!
//! A pull draws one seed in `[0, 1)` and walks the groups from the most common
//! to the rarest, subtracting each group's rate from the seed until a group's
//! interval contains what is left. Inside the chosen group every member owns
//! an equal slice of the interval.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::Member;
use crate::error::{GachaError, Result};
use crate::model::{GameModel, RuntimeGroup};

/// Decimal places of generated seeds
const SEED_SCALE: u32 = 18;
const SEED_SPAN: i64 = 1_000_000_000_000_000_000;

/// Source of uniformly distributed seeds in `[0, 1)`
pub trait SeedSource {
    fn next_seed(&mut self) -> Decimal;
}

/// Seeds drawn from a `rand` generator, 18 decimal places each
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        RngSource { rng }
    }
}

impl RngSource<ChaCha8Rng> {
    /// Reproducible source: the same seed always yields the same pulls
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng> SeedSource for RngSource<R> {
    fn next_seed(&mut self) -> Decimal {
        Decimal::new(self.rng.gen_range(0..SEED_SPAN), SEED_SCALE)
    }
}

/// Replays a fixed list of seeds, starting over when it runs out
#[derive(Debug, Clone)]
pub struct SequenceSource {
    seeds: Vec<Decimal>,
    position: usize,
}

impl SequenceSource {
    pub fn new(seeds: Vec<Decimal>) -> Result<Self> {
        if seeds.is_empty() {
            return Err(GachaError::EmptySequence);
        }
        if let Some(bad) = seeds.iter().find(|s| **s < Decimal::ZERO || **s >= Decimal::ONE) {
            return Err(GachaError::SeedOutOfRange(*bad));
        }
        Ok(SequenceSource { seeds, position: 0 })
    }
}

impl SeedSource for SequenceSource {
    fn next_seed(&mut self) -> Decimal {
        let seed = self.seeds[self.position % self.seeds.len()];
        self.position += 1;
        seed
    }
}

/// Group identity carried by a pull
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PulledGroup {
    pub name: String,
    pub tier: i32,
    pub pickup: bool,
}

impl From<&RuntimeGroup> for PulledGroup {
    fn from(group: &RuntimeGroup) -> Self {
        PulledGroup {
            name: group.name.clone(),
            tier: group.tier,
            pickup: group.pickup,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pull {
    pub member: Member,
    pub group: PulledGroup,
    pub guaranteed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RollResult {
    /// Pulls in draw order
    pub pulls: Vec<Pull>,
    /// Pulls that landed in the model's top tier
    pub top_pull_count: usize,
    /// Pulls per top-tier pull; `None` when nothing reached the top tier
    pub top_pull_rates: Option<Decimal>,
}

impl RollResult {
    /// Pulls grouped into display sessions, in draw order
    pub fn sessions(&self, session_size: u32) -> std::slice::Chunks<'_, Pull> {
        self.pulls.chunks(session_size.max(1) as usize)
    }

    /// Fraction of pulls that reached the top tier
    pub fn realized_top_rate(&self) -> Decimal {
        if self.pulls.is_empty() {
            return Decimal::ZERO;
        }
        Decimal::from(self.top_pull_count) / Decimal::from(self.pulls.len())
    }
}

/// Whether the pull at a 0-based index is a guaranteed pull.
///
/// The very first pull is never guaranteed, even when `guarantee_every` is 1.
pub fn is_guarantee_pull(index: usize, guarantee_every: u32) -> bool {
    guarantee_every != 0 && index != 0 && (index + 1) % guarantee_every as usize == 0
}

/// Find the member whose interval contains `seed`
pub fn pick_member(groups: &[RuntimeGroup], guaranteed: bool, seed: Decimal) -> Result<Pull> {
    let mut cursor = seed;

    for group in groups.iter().rev() {
        let rate = group.effective_rate(guaranteed);

        if rate > Decimal::ZERO && cursor <= rate {
            if group.members.is_empty() {
                return Err(GachaError::EmptyGroupSelected {
                    group: group.name.clone(),
                });
            }

            let step = rate / Decimal::from(group.members.len());
            let mut index = 0;
            while index + 1 < group.members.len() && cursor > step {
                cursor -= step;
                index += 1;
            }

            return Ok(Pull {
                member: group.members[index].clone(),
                group: group.into(),
                guaranteed,
            });
        }

        cursor -= rate;
    }

    Err(GachaError::SeedNotMatched { seed })
}

/// Pull `times` members from a game
pub fn roll<S: SeedSource + ?Sized>(
    model: &GameModel,
    times: u32,
    source: &mut S,
) -> Result<RollResult> {
    if times == 0 {
        return Err(GachaError::InvalidTimes(times));
    }

    let pulls = (0..times as usize)
        .map(|index| {
            let guaranteed = is_guarantee_pull(index, model.rules.guarantee_every);
            let seed = source.next_seed();
            pick_member(&model.groups, guaranteed, seed)
        })
        .collect::<Result<Vec<_>>>()?;

    let top_pull_count = match model.top_tier() {
        Some(top) => pulls.iter().filter(|p| p.group.tier == top).count(),
        None => 0,
    };
    let top_pull_rates = (top_pull_count > 0)
        .then(|| Decimal::from(pulls.len()) / Decimal::from(top_pull_count));

    tracing::debug!(
        game = %model.id,
        times,
        top_pull_count,
        "Rolled"
    );

    Ok(RollResult {
        pulls,
        top_pull_count,
        top_pull_rates,
    })
}
