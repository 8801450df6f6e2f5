//! Combatants: the health state machine plus equipment and the
//! single-attack resolution routine.

use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::combat::{damage, resolve_attack};
use crate::expr::DiceExpression;
use crate::life::{self, Health, LifeState};
use crate::weapon::{DamageType, Weapon};
use crate::{AdMode, Dice};

/// Attacks the rules do not allow to happen at all. Recovery operations are
/// never illegal; they just do nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IllegalAction {
    #[error("a dead combatant cannot attack")]
    DeadAttacker,
    #[error("an unconscious combatant cannot attack")]
    UnconsciousAttacker,
    #[error("the target is already dead")]
    DeadTarget,
}

/// The six ability modifiers. These are the bonuses themselves, not scores;
/// they add straight onto rolls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AbilityMods {
    pub strength: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub charisma: i32,
}

/// Pool of recovery dice, seeded from the hit-point notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitDice {
    pub current: u32,
    pub total: u32,
    pub sides: u32,
}

/// What one swing did. Carries the numbers; `Display` gives the words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackOutcome {
    pub attacker: String,
    pub defender: String,
    /// The natural d20.
    pub roll: u32,
    /// Natural roll plus strength and weapon bonus.
    pub total: i32,
    pub ac: i32,
    pub hit: bool,
    pub critical: bool,
    /// Damage dealt; zero on a miss.
    pub damage: i32,
    pub damage_type: DamageType,
    /// Defender hit points after the swing.
    pub defender_hp: i32,
    pub defender_state: LifeState,
}

impl fmt::Display for AttackOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hit {
            write!(
                f,
                "{} {}hits {} for {} {} damage",
                self.attacker,
                if self.critical { "critically " } else { "" },
                self.defender,
                self.damage,
                self.damage_type
            )
        } else {
            write!(f, "{} MISSES {}", self.attacker, self.defender)
        }
    }
}

pub struct Combatant {
    name: String,
    pub abilities: AbilityMods,
    pub armor_class: i32,
    pub speed: i32,
    health: Health,
    hit_dice: HitDice,
    weapons: Vec<Weapon>,
    equipped: usize,
    pub inventory: Vec<String>,
}

impl Combatant {
    /// A combatant with book-default AC 10 and speed 30, hit points rolled
    /// from the default "2d8". Everyone starts with bare fists equipped.
    pub fn new(name: impl Into<String>, dice: &mut Dice) -> Self {
        Self::with_hit_points(name, dice, &DiceExpression::dice(2, 8))
    }

    /// Roll `hp_notation` for max hit points. Its first dice term sizes the
    /// hit-dice pool; a notation with no dice term leaves the pool empty.
    pub fn with_hit_points(
        name: impl Into<String>,
        dice: &mut Dice,
        hp_notation: &DiceExpression,
    ) -> Self {
        // A fresh combatant always has at least 1 HP.
        let max_hp = hp_notation.roll(dice).max(1);
        let (count, sides) = hp_notation.leading_dice().unwrap_or((0, 0));
        Self {
            name: name.into(),
            abilities: AbilityMods::default(),
            armor_class: 10,
            speed: 30,
            health: Health::new(max_hp),
            hit_dice: HitDice {
                current: count,
                total: count,
                sides,
            },
            weapons: vec![Weapon::unarmed()],
            equipped: 0,
            inventory: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn health(&self) -> &Health {
        &self.health
    }

    pub fn hp(&self) -> i32 {
        self.health.hp
    }

    pub fn max_hp(&self) -> i32 {
        self.health.max_hp
    }

    pub fn life_state(&self) -> LifeState {
        self.health.state
    }

    pub fn is_alive(&self) -> bool {
        self.health.is_alive()
    }

    pub fn is_conscious(&self) -> bool {
        self.health.is_conscious()
    }

    pub fn hit_dice(&self) -> HitDice {
        self.hit_dice
    }

    /// Take a hit. Returns true when the blow changed the life state.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        life::apply_damage(&self.name, &mut self.health, amount, |msg| {
            debug!("{}", msg)
        })
    }

    /// Heal up to `max_hp`, waking if brought back above zero. Does nothing
    /// to the dead.
    pub fn recover_health(&mut self, amount: i32) {
        life::heal(&self.name, &mut self.health, amount, |msg| debug!("{}", msg));
    }

    /// Spend up to `n` hit dice, roll them, and recover the total. Spent
    /// dice leave the pool. Silent no-op (returns 0) when dead, unconscious,
    /// or the pool is empty. Returns hit points actually recovered.
    pub fn use_hit_dice(&mut self, dice: &mut Dice, n: u32) -> i32 {
        if !self.health.is_conscious() {
            return 0;
        }
        let spend = n.min(self.hit_dice.current);
        if spend == 0 {
            return 0;
        }
        let mut rolled = 0i32;
        for _ in 0..spend {
            rolled += dice.sample(self.hit_dice.sides) as i32;
        }
        self.hit_dice.current -= spend;
        debug!(
            "{} spends {} hit dice (d{}), {} left in the pool",
            self.name, spend, self.hit_dice.sides, self.hit_dice.current
        );
        let before = self.health.hp;
        life::heal(&self.name, &mut self.health, rolled, |msg| debug!("{}", msg));
        self.health.hp - before
    }

    /// Put spent hit dice back, up to the pool's total. Does nothing to the
    /// dead.
    pub fn recover_hit_dice(&mut self, n: u32) {
        if !self.health.is_alive() {
            return;
        }
        self.hit_dice.current = self.hit_dice.current.saturating_add(n).min(self.hit_dice.total);
    }

    pub fn add_weapon(&mut self, weapon: Weapon) {
        self.weapons.push(weapon);
    }

    /// Equip a carried weapon by name, case-insensitively. Returns false and
    /// keeps the current weapon when nothing matches.
    pub fn equip(&mut self, name: &str) -> bool {
        match self
            .weapons
            .iter()
            .position(|w| w.name().eq_ignore_ascii_case(name))
        {
            Some(i) => {
                self.equipped = i;
                true
            }
            None => false,
        }
    }

    pub fn equipped_weapon(&self) -> &Weapon {
        &self.weapons[self.equipped]
    }

    pub fn weapons(&self) -> &[Weapon] {
        &self.weapons
    }

    pub fn add_item(&mut self, item: impl Into<String>) {
        self.inventory.push(item.into());
    }

    /// Swing the equipped weapon at `target` with a fresh d20.
    pub fn attack(
        &self,
        dice: &mut Dice,
        target: &mut Combatant,
    ) -> Result<AttackOutcome, IllegalAction> {
        let roll = dice.d20(AdMode::Normal);
        self.attack_with_roll(dice, target, roll)
    }

    /// Attack resolution for an already-rolled d20; damage dice still come
    /// from `dice`. Hit when roll + strength + weapon bonus reaches the
    /// target's armor class; critical when the natural roll reaches the
    /// weapon's critical range, doubling the damage dice only.
    pub fn attack_with_roll(
        &self,
        dice: &mut Dice,
        target: &mut Combatant,
        attack_roll: u32,
    ) -> Result<AttackOutcome, IllegalAction> {
        match self.health.state {
            LifeState::Dead => return Err(IllegalAction::DeadAttacker),
            LifeState::Unconscious => return Err(IllegalAction::UnconsciousAttacker),
            LifeState::Conscious => {}
        }
        if !target.is_alive() {
            return Err(IllegalAction::DeadTarget);
        }

        let weapon = self.equipped_weapon();
        let modifier = self.abilities.strength + weapon.bonuses();
        let res = resolve_attack(
            vec![attack_roll],
            attack_roll,
            modifier,
            target.armor_class,
            weapon.crit_range(),
        );

        let mut outcome = AttackOutcome {
            attacker: self.name.clone(),
            defender: target.name.clone(),
            roll: res.roll,
            total: res.total,
            ac: res.ac,
            hit: res.hit,
            critical: res.is_crit,
            damage: 0,
            damage_type: weapon.damage_type(),
            defender_hp: target.hp(),
            defender_state: target.life_state(),
        };
        if !res.hit {
            debug!("{} misses {}", self.name, target.name);
            return Ok(outcome);
        }

        let dealt = damage(dice, weapon.damage(), modifier, res.is_crit).max(0);
        target.take_damage(dealt);
        debug!(
            "{} hits {} for {} {} damage{}",
            self.name,
            target.name,
            dealt,
            weapon.damage_type(),
            if res.is_crit { " (critical)" } else { "" }
        );

        outcome.damage = dealt;
        outcome.defender_hp = target.hp();
        outcome.defender_state = target.life_state();
        Ok(outcome)
    }
}

impl fmt::Display for Combatant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let weapon = self.equipped_weapon();
        writeln!(f, "{}", self.name)?;
        writeln!(f)?;
        writeln!(f, "Armor Class: {}", self.armor_class)?;
        writeln!(f, "Hit Points: {}/{}", self.health.hp, self.health.max_hp)?;
        writeln!(f, "Equipped Weapon: {}", weapon.name())?;
        writeln!(
            f,
            "Weapon Damage: {} {:+}",
            weapon.damage(),
            self.abilities.strength + weapon.bonuses()
        )?;
        writeln!(f, "Movement Speed: {}", self.speed)?;
        writeln!(f, "Strength Bonus: {}", self.abilities.strength)?;
        writeln!(f, "Intelligence Bonus: {}", self.abilities.intelligence)?;
        writeln!(f, "Wisdom Bonus: {}", self.abilities.wisdom)?;
        writeln!(f, "Dexterity Bonus: {}", self.abilities.dexterity)?;
        writeln!(f, "Constitution Bonus: {}", self.abilities.constitution)?;
        writeln!(f, "Charisma Bonus: {}", self.abilities.charisma)?;
        writeln!(
            f,
            "Hit Dice: {}/{} (d{})",
            self.hit_dice.current, self.hit_dice.total, self.hit_dice.sides
        )?;
        write!(f, "Inventory: {}", self.inventory.join(", "))
    }
}
