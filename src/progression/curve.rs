//! XP curve shared by level-up checks, progress bars, and treat XP.

use crate::core::constants::{MAX_PET_LEVEL, XP_CURVE_BASE, XP_CURVE_EXPONENT};
use crate::pets::{Pet, Rarity};

/// Rarer pets level more slowly.
pub fn rarity_curve_multiplier(rarity: Rarity) -> f64 {
    1.0 + 0.2 * rarity.ordinal() as f64
}

/// Total XP needed to reach `level`. `xp_for_level(0, _)` is 0.
///
/// Formula: `XP_CURVE_BASE * rarity_multiplier * level^XP_CURVE_EXPONENT`
pub fn xp_for_level(level: u32, rarity: Rarity) -> f64 {
    XP_CURVE_BASE * rarity_curve_multiplier(rarity) * (level as f64).powf(XP_CURVE_EXPONENT)
}

/// Largest level whose threshold `xp` has reached, capped at `MAX_PET_LEVEL`.
pub fn level_for_xp(xp: f64, rarity: Rarity) -> u32 {
    if !(xp > 0.0) {
        return 0;
    }

    let scale = XP_CURVE_BASE * rarity_curve_multiplier(rarity);
    let estimate = (xp / scale).powf(1.0 / XP_CURVE_EXPONENT).floor();
    let mut level = if estimate >= MAX_PET_LEVEL as f64 {
        MAX_PET_LEVEL
    } else {
        estimate as u32
    };

    // The estimate can be off by one either way from float rounding.
    while level > 0 && xp < xp_for_level(level, rarity) {
        level -= 1;
    }
    while level < MAX_PET_LEVEL && xp >= xp_for_level(level + 1, rarity) {
        level += 1;
    }
    level
}

/// Fraction of the way from the pet's current level to the next, in `[0, 1]`.
pub fn progress_to_next_level(pet: &Pet) -> f64 {
    let this_level = xp_for_level(pet.level, pet.rarity);
    let next_level = xp_for_level(pet.level + 1, pet.rarity);
    let span = next_level - this_level;
    if span <= 0.0 {
        return 1.0;
    }
    ((pet.xp - this_level) / span).clamp(0.0, 1.0)
}

/// XP still needed to reach the next level.
pub fn xp_to_next_level(pet: &Pet) -> f64 {
    (xp_for_level(pet.level + 1, pet.rarity) - pet.xp).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_zero_is_free() {
        for rarity in Rarity::ALL {
            assert_eq!(xp_for_level(0, rarity), 0.0);
        }
    }

    #[test]
    fn test_curve_is_monotonic() {
        for rarity in Rarity::ALL {
            let mut previous = xp_for_level(0, rarity);
            for level in 1..=500 {
                let current = xp_for_level(level, rarity);
                assert!(current >= previous, "{} level {}", rarity, level);
                previous = current;
            }
        }
    }

    #[test]
    fn test_rarer_pets_need_more_xp() {
        assert!(xp_for_level(10, Rarity::Legendary) > xp_for_level(10, Rarity::Common));
        assert!(xp_for_level(10, Rarity::Mythic) > xp_for_level(10, Rarity::Legendary));
    }

    #[test]
    fn test_level_for_xp_exact_thresholds() {
        for rarity in Rarity::ALL {
            for level in 0..200 {
                let threshold = xp_for_level(level, rarity);
                assert_eq!(level_for_xp(threshold, rarity), level);
                if level > 0 {
                    let just_below = threshold - 1e-6;
                    assert_eq!(level_for_xp(just_below, rarity), level - 1);
                }
            }
        }
    }

    #[test]
    fn test_level_for_xp_degenerate_inputs() {
        assert_eq!(level_for_xp(0.0, Rarity::Rare), 0);
        assert_eq!(level_for_xp(-50.0, Rarity::Rare), 0);
        assert_eq!(level_for_xp(f64::NAN, Rarity::Rare), 0);
        assert_eq!(level_for_xp(f64::INFINITY, Rarity::Rare), MAX_PET_LEVEL);
    }
}
