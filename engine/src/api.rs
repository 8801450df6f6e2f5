//! Config-driven matchup simulation: one attacker swinging at a passive
//! target until it stops being conscious. There is no turn order here; the
//! target never swings back.

use std::fs;

use anyhow::{Context, Result, anyhow, bail};
use serde::{Deserialize, Serialize};

use crate::Dice;
use crate::combatant::{AttackOutcome, Combatant};
use crate::content;
use crate::expr::DiceExpression;
use crate::life::LifeState;
use crate::weapon::Weapon;

const DEFAULT_STRENGTH: i32 = 2;
const DEFAULT_MAX_SWINGS: u32 = 30;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MatchupConfig {
    /// Target JSON on disk; takes precedence over `target_id`.
    #[serde(default)]
    pub target_path: Option<String>,
    /// Builtin target id (see [`content::builtin_targets`]).
    #[serde(default)]
    pub target_id: Option<String>,
    /// Weapons JSON on disk; takes precedence over `weapons_id`.
    #[serde(default)]
    pub weapons_path: Option<String>,
    /// Builtin weapon list id (see [`content::builtin_weapons`]).
    #[serde(default)]
    pub weapons_id: Option<String>,
    /// Weapon name to pick from the list, case-insensitive.
    pub weapon: String,
    #[serde(default)]
    pub attacker_strength: Option<i32>,
    #[serde(default)]
    pub seed: u64,
    /// Safety cap on swings per run.
    #[serde(default)]
    pub max_swings: Option<u32>,
}

/// Target description: configuration input, never persisted state.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TargetSpec {
    pub name: String,
    pub armor_class: i32,
    /// Hit-point notation, rolled once per run.
    pub hit_points: DiceExpression,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MatchupReport {
    pub swings: u32,
    pub hits: u32,
    pub crits: u32,
    pub misses: u32,
    pub damage_dealt: i32,
    pub target_hp_end: i32,
    pub target_state: LifeState,
    pub log: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MatchupStats {
    pub samples: u32,
    /// Runs where the target stopped being conscious.
    pub drops: u32,
    /// Runs where the target died outright.
    pub kills: u32,
    pub hits: u32,
    pub crits: u32,
    pub misses: u32,
    pub avg_damage_per_hit: f64,
    pub avg_swings_to_drop: f64,
    pub median_swings_to_drop: u32,
}

/// Run a single seeded matchup and return the transcript.
pub fn run_matchup(cfg: MatchupConfig) -> Result<MatchupReport> {
    let (spec, weapon) = resolve_setup(&cfg)?;
    simulate(&cfg, &spec, &weapon, cfg.seed)
}

/// One seeded swing loop against an already-resolved target and weapon.
fn simulate(
    cfg: &MatchupConfig,
    spec: &TargetSpec,
    weapon: &Weapon,
    seed: u64,
) -> Result<MatchupReport> {
    let mut logs = Vec::new();
    let mut dice = Dice::from_seed(seed);

    let mut attacker = Combatant::new("attacker", &mut dice);
    attacker.abilities.strength = cfg.attacker_strength.unwrap_or(DEFAULT_STRENGTH);
    attacker.add_weapon(weapon.clone());
    attacker.equip(&cfg.weapon);

    let mut target = Combatant::with_hit_points(spec.name.clone(), &mut dice, &spec.hit_points);
    target.armor_class = spec.armor_class;

    {
        let w = attacker.equipped_weapon();
        logs.push(format!(
            "[START] {} ({} {}) vs {} (AC {}, HP {})",
            attacker.name(),
            w.name(),
            w.damage(),
            target.name(),
            target.armor_class,
            target.hp()
        ));
    }

    let cap = cfg.max_swings.unwrap_or(DEFAULT_MAX_SWINGS);
    let mut swings = 0u32;
    let mut hits = 0u32;
    let mut crits = 0u32;
    let mut misses = 0u32;
    let mut damage_dealt = 0i32;
    while swings < cap && target.is_conscious() {
        swings += 1;
        let outcome = attacker
            .attack(&mut dice, &mut target)
            .context("attacker swing failed")?;
        if outcome.hit {
            hits += 1;
            damage_dealt += outcome.damage;
            if outcome.critical {
                crits += 1;
            }
        } else {
            misses += 1;
        }
        log_swing(&mut logs, swings, &outcome);
    }

    logs.push(format!(
        "[END] {} after {} swings: {} HP, {:?}",
        target.name(),
        swings,
        target.hp(),
        target.life_state()
    ));

    Ok(MatchupReport {
        swings,
        hits,
        crits,
        misses,
        damage_dealt,
        target_hp_end: target.hp(),
        target_state: target.life_state(),
        log: logs,
    })
}

/// Monte Carlo over `samples` runs; run `i` is seeded with `seed + i`. The
/// target and weapons sources are read once up front.
pub fn run_matchup_many(cfg: &MatchupConfig, samples: u32) -> Result<MatchupStats> {
    let (spec, weapon) = resolve_setup(cfg)?;

    let mut drops = 0u32;
    let mut kills = 0u32;
    let mut hits = 0u32;
    let mut crits = 0u32;
    let mut misses = 0u32;
    let mut damage_total = 0i64;
    let mut swings_to_drop: Vec<u32> = Vec::new();

    for i in 0..samples {
        let report = simulate(cfg, &spec, &weapon, cfg.seed.wrapping_add(i as u64))?;
        hits += report.hits;
        crits += report.crits;
        misses += report.misses;
        damage_total += report.damage_dealt as i64;
        match report.target_state {
            LifeState::Conscious => {}
            LifeState::Unconscious => {
                drops += 1;
                swings_to_drop.push(report.swings);
            }
            LifeState::Dead => {
                drops += 1;
                kills += 1;
                swings_to_drop.push(report.swings);
            }
        }
    }

    swings_to_drop.sort_unstable();
    let avg_damage_per_hit = if hits == 0 {
        0.0
    } else {
        damage_total as f64 / hits as f64
    };
    let avg_swings_to_drop = if swings_to_drop.is_empty() {
        0.0
    } else {
        swings_to_drop.iter().map(|&s| s as u64).sum::<u64>() as f64 / swings_to_drop.len() as f64
    };
    let median_swings_to_drop = if swings_to_drop.is_empty() {
        0
    } else {
        let m = swings_to_drop.len() / 2;
        if swings_to_drop.len() % 2 == 1 {
            swings_to_drop[m]
        } else {
            (swings_to_drop[m - 1] + swings_to_drop[m]) / 2
        }
    };

    Ok(MatchupStats {
        samples,
        drops,
        kills,
        hits,
        crits,
        misses,
        avg_damage_per_hit,
        avg_swings_to_drop,
        median_swings_to_drop,
    })
}

/// Find a weapon by name, case-insensitively.
pub fn find_weapon<'a>(weapons: &'a [Weapon], name: &str) -> Option<&'a Weapon> {
    weapons.iter().find(|w| w.name().eq_ignore_ascii_case(name))
}

/// Load the target spec and pick the weapon from the configured sources.
fn resolve_setup(cfg: &MatchupConfig) -> Result<(TargetSpec, Weapon)> {
    let spec = load_target(cfg)?;
    let weapons = load_weapons(cfg)?;
    let weapon = find_weapon(&weapons, &cfg.weapon)
        .cloned()
        .ok_or_else(|| anyhow!("weapon '{}' not found", cfg.weapon))?;
    Ok((spec, weapon))
}

fn load_target(cfg: &MatchupConfig) -> Result<TargetSpec> {
    if let Some(path) = &cfg.target_path {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read target JSON: {}", path))?;
        return serde_json::from_str(&text)
            .with_context(|| format!("failed to parse target JSON: {}", path));
    }
    if let Some(id) = &cfg.target_id {
        let text = content::builtin_targets()
            .get(id.as_str())
            .copied()
            .ok_or_else(|| anyhow!("unknown builtin target '{}'", id))?;
        return serde_json::from_str(text)
            .with_context(|| format!("failed to parse builtin target '{}'", id));
    }
    bail!("matchup config needs target_path or target_id")
}

fn load_weapons(cfg: &MatchupConfig) -> Result<Vec<Weapon>> {
    if let Some(path) = &cfg.weapons_path {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read weapons JSON: {}", path))?;
        return serde_json::from_str(&text)
            .with_context(|| format!("failed to parse weapons JSON: {}", path));
    }
    if let Some(id) = &cfg.weapons_id {
        let text = content::builtin_weapons()
            .get(id.as_str())
            .copied()
            .ok_or_else(|| anyhow!("unknown builtin weapon list '{}'", id))?;
        return serde_json::from_str(text)
            .with_context(|| format!("failed to parse builtin weapon list '{}'", id));
    }
    bail!("matchup config needs weapons_path or weapons_id")
}

fn log_swing(logs: &mut Vec<String>, swing: u32, outcome: &AttackOutcome) {
    let verdict = if outcome.critical {
        "CRIT!"
    } else if outcome.hit {
        "HIT"
    } else {
        "MISS"
    };
    logs.push(format!(
        "[ATTACK][swing {}] d20={} total={} vs AC={} → {}",
        swing, outcome.roll, outcome.total, outcome.ac, verdict
    ));
    if outcome.hit {
        logs.push(format!(
            "[DMG][{}] takes {} {} → {} HP ({:?})",
            outcome.defender,
            outcome.damage,
            outcome.damage_type,
            outcome.defender_hp,
            outcome.defender_state
        ));
    }
}
