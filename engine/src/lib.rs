use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub mod api;
pub mod combat;
pub mod combatant;
pub mod content;
pub mod expr;
pub mod life;
pub mod roll;
pub mod weapon;

pub use combat::{AttackResult, attack, damage};
pub use combatant::{AbilityMods, AttackOutcome, Combatant, HitDice, IllegalAction};
pub use expr::{DiceExpression, MalformedExpression, Term, evaluate};
pub use life::{Health, LifeState};
pub use roll::{
    BestOf, InvalidDiceSpec, Roll, roll, roll_ability_scores, roll_best_of, roll_with_advantage,
    roll_with_disadvantage,
};
pub use weapon::{DamageType, PersistenceError, Weapon};

/// Most dice a single term or primitive roll may throw.
pub const MAX_DICE_COUNT: u32 = 1000;
/// Largest die a single term or primitive roll may use.
pub const MAX_DIE_SIDES: u32 = 1000;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AdMode {
    Normal,
    Advantage,
    Disadvantage,
}

enum Source {
    Rng(ChaCha8Rng),
    Scripted(VecDeque<u32>),
}

/// The randomness source every roll draws from. Callers own one and pass it
/// by `&mut` wherever dice hit the table.
pub struct Dice {
    source: Source,
}

impl Dice {
    /// Deterministic stream from a seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            source: Source::Rng(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// OS-seeded stream.
    pub fn from_entropy() -> Self {
        Self {
            source: Source::Rng(ChaCha8Rng::from_entropy()),
        }
    }

    /// Fixed roll sequence for tests. Panics when the script runs dry.
    pub fn from_scripted(rolls: Vec<u32>) -> Self {
        Self {
            source: Source::Scripted(rolls.into()),
        }
    }

    /// One uniform sample in `1..=sides`.
    pub(crate) fn sample(&mut self, sides: u32) -> u32 {
        match &mut self.source {
            Source::Rng(rng) => rng.gen_range(1..=sides),
            Source::Scripted(rolls) => rolls.pop_front().expect("scripted dice exhausted"),
        }
    }

    /// One d20 under the given advantage mode.
    pub fn d20(&mut self, mode: AdMode) -> u32 {
        self.d20_detailed(mode).1
    }

    /// One d20 plus the raw rolls behind it (two under advantage or
    /// disadvantage, in roll order).
    pub fn d20_detailed(&mut self, mode: AdMode) -> (Vec<u32>, u32) {
        match mode {
            AdMode::Normal => {
                let r = self.sample(20);
                (vec![r], r)
            }
            AdMode::Advantage => {
                let a = self.sample(20);
                let b = self.sample(20);
                (vec![a, b], a.max(b))
            }
            AdMode::Disadvantage => {
                let a = self.sample(20);
                let b = self.sample(20);
                (vec![a, b], a.min(b))
            }
        }
    }
}

/// Install the process-wide tracing subscriber. Binaries call this once;
/// `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skirmish=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
