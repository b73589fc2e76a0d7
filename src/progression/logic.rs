//! Level-ups, bonus growth, and treats.

use super::curve::{level_for_xp, xp_for_level};
use crate::config::EngineConfig;
use crate::core::constants::{
    BONUS_IMPROVEMENT_RATE, BONUS_MILESTONE_INTERVAL, FIRST_BONUS_MILESTONE_LEVEL,
    TREAT_ROLL_STEPS, TREAT_XP_LOG_BASE, TREAT_XP_LOWER_BOUND, TREAT_XP_SOFTCAP_LEVEL,
};
use crate::error::{PetError, Result};
use crate::pets::{aggregate, roll_bonus, BonusType, Pet, PetBonus, Rarity};
use crate::random::RandomSource;

/// Result of recomputing a pet's level after an XP change.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelUp {
    /// The updated pet. Unchanged apart from XP when no level was gained.
    pub pet: Pet,
    pub old_level: u32,
    pub new_level: u32,
    /// Bonuses appended at milestone levels during this update.
    pub bonuses_granted: Vec<PetBonus>,
}

impl LevelUp {
    pub fn levels_gained(&self) -> u32 {
        self.new_level - self.old_level
    }

    pub fn leveled_up(&self) -> bool {
        self.new_level > self.old_level
    }
}

/// Result of feeding a treat.
#[derive(Debug, Clone, PartialEq)]
pub struct TreatOutcome {
    pub xp_gained: u64,
    pub level_up: LevelUp,
}

/// Level 10 and every multiple of 25 grant a new bonus.
pub fn is_bonus_milestone(level: u32) -> bool {
    level == FIRST_BONUS_MILESTONE_LEVEL || (level > 0 && level % BONUS_MILESTONE_INTERVAL == 0)
}

/// One improvement pass: every bonus grows by 1% of its magnitude.
pub fn improve_bonuses(bonuses: &mut [PetBonus]) {
    for bonus in bonuses.iter_mut() {
        bonus.value += bonus.value.abs() * BONUS_IMPROVEMENT_RATE;
    }
}

/// Recompute the pet's level from its XP and apply per-level rewards.
///
/// For each level advanced, a milestone level first appends one rolled bonus,
/// then every bonus (including any just granted) gets one improvement pass.
/// Levels never go down.
pub fn apply_level_up(pet: &Pet, config: &EngineConfig, rng: &mut impl RandomSource) -> LevelUp {
    let mut updated = pet.clone();
    let old_level = pet.level;
    let target = level_for_xp(pet.xp, pet.rarity);
    let mut bonuses_granted = Vec::new();

    if target > old_level {
        for level in (old_level + 1)..=target {
            if is_bonus_milestone(level) {
                let bonus = roll_bonus(updated.rarity, config, rng);
                updated.bonuses.push(bonus);
                bonuses_granted.push(bonus);
            }
            improve_bonuses(&mut updated.bonuses);
        }
        updated.level = target;
        log::debug!(
            "{} ({}) leveled {} -> {}, {} new bonuses",
            updated.display_name(),
            updated.rarity,
            old_level,
            target,
            bonuses_granted.len()
        );
    }

    LevelUp {
        new_level: updated.level,
        pet: updated,
        old_level,
        bonuses_granted,
    }
}

/// Add XP to a pet and apply any resulting level-ups.
pub fn add_xp(
    pet: &Pet,
    xp: f64,
    config: &EngineConfig,
    rng: &mut impl RandomSource,
) -> LevelUp {
    let mut updated = pet.clone();
    updated.xp = (updated.xp + xp).max(0.0);
    apply_level_up(&updated, config, rng)
}

/// Upper bound of a treat's base XP at `level`.
///
/// Past level 50 the span between levels is divided by `1 + log_1.5(level - 50)`.
/// Rounding sends halves to the even neighbour.
pub fn treat_xp_upper_bound(level: u32, rarity: Rarity) -> f64 {
    let span = xp_for_level(level + 1, rarity) - xp_for_level(level, rarity);
    let over_softcap = (level as i64 - TREAT_XP_SOFTCAP_LEVEL).max(1) as f64;
    let scaled = span / (1.0 + over_softcap.ln() / TREAT_XP_LOG_BASE.ln());
    (TREAT_XP_LOWER_BOUND + 1.0).max(scaled.round_ties_even())
}

/// Roll the XP granted by one treat.
///
/// Draws `r` from `{0.00, 0.01, ..., 1.00}` and interpolates between 100 and
/// the level's upper bound, then applies the treat bonus multiplier. Halves
/// round to even, so a 100.5 roll grants 100.
pub fn calculate_treat_xp(
    level: u32,
    rarity: Rarity,
    treat_bonus: f64,
    rng: &mut impl RandomSource,
) -> u64 {
    let lower = TREAT_XP_LOWER_BOUND;
    let upper = treat_xp_upper_bound(level, rarity);
    let r = rng.uniform_int(TREAT_ROLL_STEPS + 1) as f64 / TREAT_ROLL_STEPS as f64;
    let gain = ((r * (upper - lower) + lower) * treat_bonus).round_ties_even();
    gain.max(0.0) as u64
}

/// Feed a treat to `pet`, using the owner's active pets for the treat bonus.
pub fn feed_treat(
    pet: &Pet,
    active: &[Pet],
    config: &EngineConfig,
    rng: &mut impl RandomSource,
) -> Result<TreatOutcome> {
    if !pet.alive {
        return Err(PetError::PetIsDead(pet.display_name().to_string()));
    }
    let treat_bonus = aggregate(active, BonusType::TREAT_XP);
    let xp_gained = calculate_treat_xp(pet.level, pet.rarity, treat_bonus, rng);
    let level_up = add_xp(pet, xp_gained as f64, config, rng);
    Ok(TreatOutcome {
        xp_gained,
        level_up,
    })
}
