//! Weapons and their flat JSON persistence.
//!
//! A weapon owns its damage notation but never rolls it; rolling is the
//! combat layer's job.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::expr::DiceExpression;

/// Error persisting a weapon as flat JSON.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("IO error reading {path:?}: {error}")]
    Read {
        error: std::io::Error,
        path: PathBuf,
    },
    #[error("IO error writing {path:?}: {error}")]
    Write {
        error: std::io::Error,
        path: PathBuf,
    },
    #[error("bad weapon JSON: {error}")]
    Parse { error: serde_json::Error },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    Bludgeoning,
    Piercing,
    Slashing,
    Fire,
    Cold,
    Lightning,
    Acid,
    Poison,
    Psychic,
    Radiant,
    Necrotic,
    Thunder,
    Force,
}

impl fmt::Display for DamageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DamageType::Bludgeoning => "bludgeoning",
            DamageType::Piercing => "piercing",
            DamageType::Slashing => "slashing",
            DamageType::Fire => "fire",
            DamageType::Cold => "cold",
            DamageType::Lightning => "lightning",
            DamageType::Acid => "acid",
            DamageType::Poison => "poison",
            DamageType::Psychic => "psychic",
            DamageType::Radiant => "radiant",
            DamageType::Necrotic => "necrotic",
            DamageType::Thunder => "thunder",
            DamageType::Force => "force",
        };
        f.write_str(s)
    }
}

/// The JSON form is a flat object with exactly these six fields; missing or
/// unknown fields are hard errors, no defaults. `damage` serializes as its
/// notation text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Weapon {
    name: String,
    damage: DiceExpression,
    damage_type: DamageType,
    crit_range: i32,
    bonuses: i32,
    description: String,
}

impl Weapon {
    /// A weapon with the default critical range (20), no bonus, and an empty
    /// description.
    pub fn new(name: impl Into<String>, damage: DiceExpression, damage_type: DamageType) -> Self {
        Self {
            name: name.into(),
            damage,
            damage_type,
            crit_range: 20,
            bonuses: 0,
            description: String::new(),
        }
    }

    /// The fallback everyone carries: an unarmed strike.
    pub fn unarmed() -> Self {
        Self::new("fist", DiceExpression::dice(1, 4), DamageType::Bludgeoning)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn damage(&self) -> &DiceExpression {
        &self.damage
    }

    pub fn damage_type(&self) -> DamageType {
        self.damage_type
    }

    /// Lowest natural d20 roll that counts as a critical hit.
    pub fn crit_range(&self) -> i32 {
        self.crit_range
    }

    /// Flat bonus applied to both attack and damage rolls.
    pub fn bonuses(&self) -> i32 {
        self.bonuses
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_bonus(&mut self, bonuses: i32) {
        self.bonuses = bonuses;
    }

    /// Parse a weapon from a flat JSON object string.
    pub fn from_json(text: &str) -> Result<Self, PersistenceError> {
        serde_json::from_str(text).map_err(|error| PersistenceError::Parse { error })
    }

    /// The weapon as a flat JSON object string.
    pub fn to_json(&self) -> Result<String, PersistenceError> {
        serde_json::to_string(self).map_err(|error| PersistenceError::Parse { error })
    }

    /// Load a single weapon from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|error| PersistenceError::Read {
            error,
            path: path.to_path_buf(),
        })?;
        Self::from_json(&text)
    }

    /// Write the weapon to a JSON file, overwriting anything there.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PersistenceError> {
        let path = path.as_ref();
        let text =
            serde_json::to_string_pretty(self).map_err(|error| PersistenceError::Parse { error })?;
        fs::write(path, text).map_err(|error| PersistenceError::Write {
            error,
            path: path.to_path_buf(),
        })
    }
}

impl fmt::Display for Weapon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name: {}, {}", self.name, self.damage)?;
        if self.bonuses != 0 {
            write!(f, "{:+}", self.bonuses)?;
        }
        write!(f, " {}", self.damage_type)
    }
}
