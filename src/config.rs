//! Generation tuning data.
//!
//! Contract formulas live in `core::constants`; everything here is free
//! game-balance data that can be overridden from a JSON file.

use crate::error::{PetError, Result};
use crate::pets::BonusType;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One entry of the bonus roll table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BonusWeight {
    pub bonus_type: BonusType,
    pub weight: f64,
}

impl BonusWeight {
    pub fn new(bonus_type: BonusType, weight: f64) -> Self {
        Self { bonus_type, weight }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Relative weight of each rarity, indexed by rarity ordinal.
    pub rarity_weights: [f64; 6],

    /// Relative weight of each size, indexed by size ordinal.
    pub size_weights: [f64; 5],

    /// Range of percentage bonus values (0.05 = +5%), indexed by rarity ordinal.
    pub percent_bonus_ranges: [(f64, f64); 6],

    /// Range of flat pet-slot bonus values, indexed by rarity ordinal.
    pub slot_bonus_ranges: [(f64, f64); 6],

    /// Which bonus types can be rolled and how often.
    pub bonus_weights: Vec<BonusWeight>,

    /// A found pet may already have lived up to this fraction of its max age.
    pub max_starting_age_fraction: f64,

    /// Inclusive range of flavour attributes given to a new pet.
    pub attribute_count: (u32, u32),
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rarity_weights: [60.0, 25.0, 10.0, 4.0, 0.9, 0.1],
            size_weights: [10.0, 25.0, 35.0, 20.0, 10.0],
            percent_bonus_ranges: [
                (0.01, 0.03),
                (0.02, 0.04),
                (0.03, 0.06),
                (0.04, 0.08),
                (0.06, 0.10),
                (0.08, 0.14),
            ],
            slot_bonus_ranges: [
                (0.10, 0.25),
                (0.15, 0.35),
                (0.20, 0.50),
                (0.30, 0.70),
                (0.50, 1.00),
                (0.80, 1.50),
            ],
            bonus_weights: vec![
                BonusWeight::new(BonusType::TEXT_XP, 3.0),
                BonusWeight::new(BonusType::VOICE_XP, 3.0),
                BonusWeight::new(BonusType::STREAM_XP, 1.0),
                BonusWeight::new(BonusType::VIDEO_XP, 1.0),
                BonusWeight::new(BonusType::ALL_XP, 1.0),
                BonusWeight::new(BonusType::MUTED_PENALTY, 1.0),
                BonusWeight::new(BonusType::DEAFENED_PENALTY, 1.0),
                BonusWeight::new(BonusType::TREAT_XP, 2.0),
                BonusWeight::new(BonusType::SEARCH, 2.0),
                BonusWeight::new(BonusType::BEFRIEND, 2.0),
                BonusWeight::new(BonusType::PET_SLOTS, 1.0),
            ],
            max_starting_age_fraction: 0.25,
            attribute_count: (1, 3),
        }
    }
}

impl EngineConfig {
    /// Parse a config from JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded engine config from {}", path.display());
        Ok(config)
    }

    /// Reject tables the generator cannot sample from.
    pub fn validate(&self) -> Result<()> {
        check_weights("rarity_weights", self.rarity_weights.iter().copied())?;
        check_weights("size_weights", self.size_weights.iter().copied())?;
        check_weights("bonus_weights", self.bonus_weights.iter().map(|w| w.weight))?;

        if self.bonus_weights.iter().any(|w| w.bonus_type.is_empty()) {
            return Err(PetError::Config(
                "bonus_weights contains an empty bonus type".to_string(),
            ));
        }

        let ranges = self
            .percent_bonus_ranges
            .iter()
            .chain(self.slot_bonus_ranges.iter());
        for (min, max) in ranges {
            if !(min.is_finite() && max.is_finite()) || min < &0.0 || min > max {
                return Err(PetError::Config(format!(
                    "invalid bonus range ({}, {})",
                    min, max
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.max_starting_age_fraction) {
            return Err(PetError::Config(format!(
                "max_starting_age_fraction must be within [0, 1], got {}",
                self.max_starting_age_fraction
            )));
        }

        if self.attribute_count.0 > self.attribute_count.1 {
            return Err(PetError::Config(format!(
                "attribute_count min {} exceeds max {}",
                self.attribute_count.0, self.attribute_count.1
            )));
        }

        Ok(())
    }
}

fn check_weights(name: &str, weights: impl Iterator<Item = f64>) -> Result<()> {
    let mut total = 0.0;
    for w in weights {
        if !w.is_finite() || w < 0.0 {
            return Err(PetError::Config(format!("{} has invalid weight {}", name, w)));
        }
        total += w;
    }
    if total <= 0.0 {
        return Err(PetError::Config(format!("{} sums to zero", name)));
    }
    Ok(())
}
