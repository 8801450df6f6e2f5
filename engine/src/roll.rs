//! Primitive roll operations over a [`Dice`] source.

use thiserror::Error;

use crate::{AdMode, Dice, MAX_DICE_COUNT, MAX_DIE_SIDES};

/// Invalid parameters for a primitive roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidDiceSpec {
    #[error("dice count must be at least 1")]
    ZeroCount,
    #[error("die sides must be at least 1")]
    ZeroSides,
    #[error("dice count above {}", MAX_DICE_COUNT)]
    CountTooLarge,
    #[error("die sides above {}", MAX_DIE_SIDES)]
    SidesTooLarge,
}

/// Outcome of a primitive roll. Ephemeral; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roll {
    /// Individual die values, in roll order.
    pub values: Vec<u32>,
    pub modifier: i32,
    pub total: i32,
}

/// Roll `count` independent dice of `sides` and add `modifier`.
pub fn roll(
    dice: &mut Dice,
    count: u32,
    sides: u32,
    modifier: i32,
) -> Result<Roll, InvalidDiceSpec> {
    if count == 0 {
        return Err(InvalidDiceSpec::ZeroCount);
    }
    if sides == 0 {
        return Err(InvalidDiceSpec::ZeroSides);
    }
    if count > MAX_DICE_COUNT {
        return Err(InvalidDiceSpec::CountTooLarge);
    }
    if sides > MAX_DIE_SIDES {
        return Err(InvalidDiceSpec::SidesTooLarge);
    }
    let mut values = Vec::with_capacity(count as usize);
    for _ in 0..count {
        values.push(dice.sample(sides));
    }
    let total = (values.iter().sum::<u32>() as i32).saturating_add(modifier);
    Ok(Roll {
        values,
        modifier,
        total,
    })
}

/// Outcome of a keep-highest roll. Kept values are sorted descending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestOf {
    pub kept: Vec<u32>,
    pub total: i32,
}

/// Roll `count` dice of `sides` and keep the `keep` highest. A `keep`
/// larger than `count` keeps everything.
pub fn roll_best_of(
    dice: &mut Dice,
    count: u32,
    sides: u32,
    keep: u32,
) -> Result<BestOf, InvalidDiceSpec> {
    let mut values = roll(dice, count, sides, 0)?.values;
    keep_highest(&mut values, keep);
    let total = values.iter().sum::<u32>() as i32;
    Ok(BestOf {
        kept: values,
        total,
    })
}

/// Roll two d20s, keep the higher, add `modifier`.
pub fn roll_with_advantage(dice: &mut Dice, modifier: i32) -> i32 {
    dice.d20(AdMode::Advantage) as i32 + modifier
}

/// Roll two d20s, keep the lower, add `modifier`.
pub fn roll_with_disadvantage(dice: &mut Dice, modifier: i32) -> i32 {
    dice.d20(AdMode::Disadvantage) as i32 + modifier
}

/// Six ability scores, each the best three of 5d6.
/// Five dice per score instead of the book's four.
pub fn roll_ability_scores(dice: &mut Dice) -> [i32; 6] {
    let mut scores = [0; 6];
    for slot in &mut scores {
        let mut values: Vec<u32> = (0..5).map(|_| dice.sample(6)).collect();
        keep_highest(&mut values, 3);
        *slot = values.iter().sum::<u32>() as i32;
    }
    scores
}

fn keep_highest(values: &mut Vec<u32>, keep: u32) {
    values.sort_unstable_by(|a, b| b.cmp(a));
    values.truncate(keep as usize);
}
