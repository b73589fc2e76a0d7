//! Bonus types and aggregation across a pet collection.

use super::types::Pet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr};

/// A set of bonus categories, stored as independent bit flags.
///
/// A single bonus may cover several categories (e.g. `ALL_XP`). Matching is a
/// plain mask intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BonusType(pub u32);

impl BonusType {
    pub const NONE: BonusType = BonusType(0);
    pub const TEXT_XP: BonusType = BonusType(1 << 0);
    pub const VOICE_XP: BonusType = BonusType(1 << 1);
    pub const STREAM_XP: BonusType = BonusType(1 << 2);
    pub const VIDEO_XP: BonusType = BonusType(1 << 3);
    pub const MUTED_PENALTY: BonusType = BonusType(1 << 4);
    pub const DEAFENED_PENALTY: BonusType = BonusType(1 << 5);
    pub const TREAT_XP: BonusType = BonusType(1 << 6);
    pub const SEARCH: BonusType = BonusType(1 << 7);
    pub const BEFRIEND: BonusType = BonusType(1 << 8);
    pub const PET_SLOTS: BonusType = BonusType(1 << 9);

    pub const ALL_XP: BonusType =
        BonusType(Self::TEXT_XP.0 | Self::VOICE_XP.0 | Self::STREAM_XP.0 | Self::VIDEO_XP.0);

    /// Every single-category flag, in bit order.
    pub const SINGLE: [BonusType; 10] = [
        BonusType::TEXT_XP,
        BonusType::VOICE_XP,
        BonusType::STREAM_XP,
        BonusType::VIDEO_XP,
        BonusType::MUTED_PENALTY,
        BonusType::DEAFENED_PENALTY,
        BonusType::TREAT_XP,
        BonusType::SEARCH,
        BonusType::BEFRIEND,
        BonusType::PET_SLOTS,
    ];

    pub fn bits(&self) -> u32 {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// True if any flag is shared with `other`.
    pub fn intersects(&self, other: BonusType) -> bool {
        (self.0 & other.0) != 0
    }

    /// True if every flag of `other` is set.
    pub fn contains(&self, other: BonusType) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Percentage multipliers stack onto 1.0; the pet-slot bonus is a flat count.
    pub fn is_percentage(&self) -> bool {
        !self.intersects(BonusType::PET_SLOTS)
    }

    /// Penalty-reduction categories, where a positive value makes things worse.
    pub fn is_negative(&self) -> bool {
        self.intersects(BonusType::MUTED_PENALTY | BonusType::DEAFENED_PENALTY)
    }

    pub fn name(&self) -> String {
        if *self == BonusType::ALL_XP {
            return "All XP".to_string();
        }
        let names: Vec<&str> = BonusType::SINGLE
            .iter()
            .filter(|flag| self.contains(**flag))
            .map(|flag| single_name(*flag))
            .collect();
        if names.is_empty() {
            "None".to_string()
        } else {
            names.join(" + ")
        }
    }
}

fn single_name(flag: BonusType) -> &'static str {
    match flag {
        BonusType::TEXT_XP => "Text XP",
        BonusType::VOICE_XP => "Voice XP",
        BonusType::STREAM_XP => "Stream XP",
        BonusType::VIDEO_XP => "Video XP",
        BonusType::MUTED_PENALTY => "Muted Penalty",
        BonusType::DEAFENED_PENALTY => "Deafened Penalty",
        BonusType::TREAT_XP => "Treat XP",
        BonusType::SEARCH => "Search Chance",
        BonusType::BEFRIEND => "Befriend Chance",
        BonusType::PET_SLOTS => "Pet Slots",
        _ => "Unknown",
    }
}

impl BitOr for BonusType {
    type Output = BonusType;

    fn bitor(self, rhs: BonusType) -> BonusType {
        BonusType(self.0 | rhs.0)
    }
}

impl BitAnd for BonusType {
    type Output = BonusType;

    fn bitand(self, rhs: BonusType) -> BonusType {
        BonusType(self.0 & rhs.0)
    }
}

impl fmt::Display for BonusType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Total bonus of `target` type across `active` pets.
///
/// Percentage types start at 1.0 so the result is a multiplier; the slot type
/// starts at 0.0 so the result is a count. Disabled pets must not be passed in.
pub fn aggregate(active: &[Pet], target: BonusType) -> f64 {
    let start = if target.is_percentage() { 1.0 } else { 0.0 };
    active
        .iter()
        .flat_map(|pet| pet.bonuses.iter())
        .filter(|bonus| bonus.bonus_type.intersects(target))
        .fold(start, |total, bonus| total + bonus.value)
}
