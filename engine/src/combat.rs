//! Low-level attack and damage rolls.

use tracing::debug;

use crate::expr::DiceExpression;
use crate::{AdMode, Dice};

/// Outcome of a single to-hit roll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackResult {
    /// Raw d20 rolls behind the kept roll.
    pub raw_rolls: Vec<u32>,
    /// The kept natural roll.
    pub roll: u32,
    /// Kept roll plus the attack bonus.
    pub total: i32,
    /// Armor class the roll was made against.
    pub ac: i32,
    pub hit: bool,
    /// Hit with the natural roll inside the weapon's critical range.
    pub is_crit: bool,
}

/// Roll one attack: a d20 under `mode`, plus `bonus`, against `ac`. A hit
/// whose natural roll is `crit_range` or higher is a critical.
pub fn attack(dice: &mut Dice, mode: AdMode, bonus: i32, ac: i32, crit_range: i32) -> AttackResult {
    let (raw_rolls, roll) = dice.d20_detailed(mode);
    resolve_attack(raw_rolls, roll, bonus, ac, crit_range)
}

/// Attack resolution for an already-rolled d20. The hit test is a plain
/// threshold; there is no automatic hit or miss on 20 or 1.
pub fn resolve_attack(
    raw_rolls: Vec<u32>,
    roll: u32,
    bonus: i32,
    ac: i32,
    crit_range: i32,
) -> AttackResult {
    let total = roll as i32 + bonus;
    let hit = total >= ac;
    let is_crit = hit && roll as i32 >= crit_range;
    debug!(
        "attack roll: d20={} total={} vs ac={} hit={} crit={}",
        roll, total, ac, hit, is_crit
    );
    AttackResult {
        raw_rolls,
        roll,
        total,
        ac,
        hit,
        is_crit,
    }
}

/// Roll weapon damage. A critical doubles every dice term of the expression;
/// flat terms and `modifier` are added once.
pub fn damage(dice: &mut Dice, expr: &DiceExpression, modifier: i32, crit: bool) -> i32 {
    let factor = if crit { 2 } else { 1 };
    let total = expr.roll_scaled(dice, factor) + modifier;
    debug!(
        "damage roll: expr={} modifier={:+} crit={} total={}",
        expr, modifier, crit, total
    );
    total
}
