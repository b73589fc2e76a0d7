//! Encounter and death probabilities.
//!
//! Every function returns a probability already clamped to `[0, 1]`.

use crate::core::constants::{BEFRIEND_BASE_RATE, CORRUPTION_CHANCE, SEARCH_BASE_FACTOR};
use crate::pets::{aggregate, max_age, starting_bonus_count, BonusType, Pet, Rarity};
use crate::random::{clamp_probability, RandomSource};
use chrono::{DateTime, Utc};

/// Chance that a search turns up a pet.
///
/// `min(1, (2 / owned) * search_bonus)`. With no pets owned the quotient is
/// unbounded, so the search always succeeds.
pub fn search_chance(owned_count: usize, active: &[Pet]) -> f64 {
    if owned_count == 0 {
        return 1.0;
    }
    let bonus = aggregate(active, BonusType::SEARCH);
    clamp_probability((SEARCH_BASE_FACTOR / owned_count as f64 * bonus).min(1.0))
}

/// Befriend rate before the befriend bonus multiplier.
///
/// `0.10 + (capacity - owned) / (capacity + rarity_modifier)`. A zero
/// denominator contributes nothing beyond the base rate.
pub fn befriend_rate(capacity: i64, owned_count: usize, rarity_modifier: u32) -> f64 {
    let denominator = capacity as f64 + rarity_modifier as f64;
    let fraction = if denominator == 0.0 {
        0.0
    } else {
        (capacity - owned_count as i64) as f64 / denominator
    };
    BEFRIEND_BASE_RATE + fraction
}

/// Chance to befriend a found pet of `rarity`.
///
/// Draws a rarity modifier uniformly from `0..=rarity ordinal`, so rarer pets
/// are harder to befriend on average.
pub fn befriend_chance(
    rarity: Rarity,
    capacity: i64,
    owned_count: usize,
    active: &[Pet],
    rng: &mut impl RandomSource,
) -> f64 {
    let rarity_modifier = rng.uniform_int(rarity.ordinal() + 1);
    let rate = befriend_rate(capacity, owned_count, rarity_modifier);
    clamp_probability(rate * aggregate(active, BonusType::BEFRIEND))
}

/// Chance that a freshly befriended pet turns out corrupted.
pub fn corruption_chance() -> f64 {
    CORRUPTION_CHANCE
}

/// Chance that `pet` dies at a check made at `now`.
///
/// Zero for dead pets and for pets found on the same calendar day. Otherwise
/// `(age / max_age) / (starting_bonuses + rarity ordinal + size ordinal)`.
pub fn death_chance(pet: &Pet, now: DateTime<Utc>) -> f64 {
    if !pet.alive || pet.found_on_day_of(now) {
        return 0.0;
    }

    let lifespan = max_age(pet.species).num_seconds() as f64;
    if lifespan <= 0.0 {
        return 1.0;
    }
    let life_progress = pet.age(now).num_seconds() as f64 / lifespan;

    let resilience =
        (starting_bonus_count(pet.rarity) + pet.rarity.ordinal() + pet.size.ordinal()) as f64;
    clamp_probability(life_progress / resilience)
}
