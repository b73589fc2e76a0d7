//! Pet data records.

use super::bonus::BonusType;
use crate::error::{PetError, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Row identifier assigned by the repository on first insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RowId(pub i64);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Chat-platform user identifier of a pet owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OwnerId(pub u64);

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The parts of a user the engine cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetOwner {
    pub id: OwnerId,
    /// The owner's own chat level, which grants extra base slots.
    pub level: u32,
}

impl PetOwner {
    pub fn new(id: OwnerId, level: u32) -> Self {
        Self { id, level }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common = 0,
    Uncommon = 1,
    Rare = 2,
    Epic = 3,
    Legendary = 4,
    Mythic = 5,
}

impl Rarity {
    pub const ALL: [Rarity; 6] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
        Rarity::Mythic,
    ];

    /// Returns the display name for this rarity tier.
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
            Rarity::Mythic => "Mythic",
        }
    }

    pub fn ordinal(&self) -> u32 {
        *self as u32
    }
}

impl TryFrom<u8> for Rarity {
    type Error = PetError;

    fn try_from(value: u8) -> Result<Self> {
        Rarity::ALL
            .get(value as usize)
            .copied()
            .ok_or(PetError::UnknownRarity(value))
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    // Common
    Cat,
    Dog,
    Hamster,
    // Uncommon
    Rabbit,
    Parrot,
    Ferret,
    // Rare
    Fox,
    Owl,
    Tortoise,
    // Epic
    Wolf,
    Panther,
    Axolotl,
    // Legendary
    Dragon,
    Phoenix,
    Unicorn,
    // Mythic
    Kirin,
    Leviathan,
    Thunderbird,
}

impl Species {
    pub const ALL: [Species; 18] = [
        Species::Cat,
        Species::Dog,
        Species::Hamster,
        Species::Rabbit,
        Species::Parrot,
        Species::Ferret,
        Species::Fox,
        Species::Owl,
        Species::Tortoise,
        Species::Wolf,
        Species::Panther,
        Species::Axolotl,
        Species::Dragon,
        Species::Phoenix,
        Species::Unicorn,
        Species::Kirin,
        Species::Leviathan,
        Species::Thunderbird,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Species::Cat => "Cat",
            Species::Dog => "Dog",
            Species::Hamster => "Hamster",
            Species::Rabbit => "Rabbit",
            Species::Parrot => "Parrot",
            Species::Ferret => "Ferret",
            Species::Fox => "Fox",
            Species::Owl => "Owl",
            Species::Tortoise => "Tortoise",
            Species::Wolf => "Wolf",
            Species::Panther => "Panther",
            Species::Axolotl => "Axolotl",
            Species::Dragon => "Dragon",
            Species::Phoenix => "Phoenix",
            Species::Unicorn => "Unicorn",
            Species::Kirin => "Kirin",
            Species::Leviathan => "Leviathan",
            Species::Thunderbird => "Thunderbird",
        }
    }

    /// Parse a species from its display name (case-insensitive).
    pub fn from_name(name: &str) -> Result<Self> {
        Species::ALL
            .iter()
            .copied()
            .find(|s| s.name().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| PetError::UnknownSpecies(name.to_string()))
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PetSize {
    Tiny = 0,
    Small = 1,
    Medium = 2,
    Large = 3,
    Giant = 4,
}

impl PetSize {
    pub const ALL: [PetSize; 5] = [
        PetSize::Tiny,
        PetSize::Small,
        PetSize::Medium,
        PetSize::Large,
        PetSize::Giant,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PetSize::Tiny => "Tiny",
            PetSize::Small => "Small",
            PetSize::Medium => "Medium",
            PetSize::Large => "Large",
            PetSize::Giant => "Giant",
        }
    }

    pub fn ordinal(&self) -> u32 {
        *self as u32
    }
}

/// Flavour text attached to a pet. No mechanical effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetAttribute {
    pub name: String,
    pub description: String,
}

/// One stacking modifier attached to a pet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PetBonus {
    pub bonus_type: BonusType,
    pub value: f64,
}

impl PetBonus {
    pub fn new(bonus_type: BonusType, value: f64) -> Self {
        Self { bonus_type, value }
    }

    /// Whether this bonus helps its owner.
    ///
    /// Penalty-reduction types store improvements as non-positive values.
    pub fn is_beneficial(&self) -> bool {
        if self.bonus_type.is_negative() {
            self.value <= 0.0
        } else {
            self.value > 0.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    /// `None` until the repository assigns a row.
    pub id: Option<RowId>,
    pub owner: OwnerId,
    pub name: Option<String>,
    pub species: Species,
    pub rarity: Rarity,
    pub size: PetSize,
    pub born_at: DateTime<Utc>,
    pub found_at: DateTime<Utc>,
    /// 0 is the highest priority.
    pub priority: u32,
    pub xp: f64,
    pub level: u32,
    pub alive: bool,
    pub corrupted: bool,
    pub attributes: Vec<PetAttribute>,
    pub bonuses: Vec<PetBonus>,
}

impl Pet {
    /// User-set name, falling back to the species name.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.species.name())
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Row id, or `NotPersisted` for freshly generated pets.
    pub fn row_id(&self) -> Result<RowId> {
        self.id.ok_or(PetError::NotPersisted)
    }

    /// Time since birth. Never negative.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        let age = now - self.born_at;
        if age < Duration::zero() {
            Duration::zero()
        } else {
            age
        }
    }

    /// Whether the pet was found on the same UTC calendar day as `now`.
    pub fn found_on_day_of(&self, now: DateTime<Utc>) -> bool {
        self.found_at.date_naive() == now.date_naive()
    }
}
