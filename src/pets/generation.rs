//! Pet generation: rarity-weighted species pick, starting bonuses, corruption.

use super::names::ATTRIBUTE_POOL;
use super::tables::{max_age, species_of_rarity, starting_bonus_count};
use super::types::{OwnerId, Pet, PetAttribute, PetBonus, PetSize, Rarity, Species};
use crate::config::EngineConfig;
use crate::random::RandomSource;
use chrono::{DateTime, Duration, Utc};

/// Generate a wild pet found by `owner` at `now`.
///
/// The pet is unpersisted (`id` is `None`) and has placeholder priority 0;
/// `adopt` assigns the real priority once it joins a collection.
pub fn generate_pet(
    owner: OwnerId,
    config: &EngineConfig,
    now: DateTime<Utc>,
    rng: &mut impl RandomSource,
) -> Pet {
    let rarity = roll_rarity(config, rng);
    let species = roll_species(rarity, rng);
    let size = roll_size(config, rng);

    let lived = max_age(species).num_seconds() as f64
        * rng.uniform_range(0.0, config.max_starting_age_fraction);
    let born_at = now - Duration::seconds(lived as i64);

    let bonuses = roll_starting_bonuses(rarity, config, rng);
    let attributes = roll_attributes(config, rng);

    log::debug!(
        "Generated {} {} ({}) with {} bonuses for owner {}",
        rarity,
        species,
        size.name(),
        bonuses.len(),
        owner
    );

    Pet {
        id: None,
        owner,
        name: None,
        species,
        rarity,
        size,
        born_at,
        found_at: now,
        priority: 0,
        xp: 0.0,
        level: 0,
        alive: true,
        corrupted: false,
        attributes,
        bonuses,
    }
}

/// Rolls a rarity tier from the configured weights.
pub fn roll_rarity(config: &EngineConfig, rng: &mut impl RandomSource) -> Rarity {
    Rarity::ALL[weighted_index(&config.rarity_weights, rng)]
}

/// Picks a species of the given rarity uniformly.
pub fn roll_species(rarity: Rarity, rng: &mut impl RandomSource) -> Species {
    let candidates = species_of_rarity(rarity);
    candidates[rng.uniform_int(candidates.len() as u32) as usize]
}

pub fn roll_size(config: &EngineConfig, rng: &mut impl RandomSource) -> PetSize {
    PetSize::ALL[weighted_index(&config.size_weights, rng)]
}

/// One bonus per starting slot of the rarity.
pub fn roll_starting_bonuses(
    rarity: Rarity,
    config: &EngineConfig,
    rng: &mut impl RandomSource,
) -> Vec<PetBonus> {
    (0..starting_bonus_count(rarity))
        .map(|_| roll_bonus(rarity, config, rng))
        .collect()
}

/// Rolls a single bonus: weighted type, then a value scaled by rarity.
///
/// Penalty-reduction types are stored as non-positive values (an improvement).
pub fn roll_bonus(rarity: Rarity, config: &EngineConfig, rng: &mut impl RandomSource) -> PetBonus {
    let weights: Vec<f64> = config.bonus_weights.iter().map(|w| w.weight).collect();
    let bonus_type = config.bonus_weights[weighted_index(&weights, rng)].bonus_type;

    let (min, max) = if bonus_type.is_percentage() {
        config.percent_bonus_ranges[rarity.ordinal() as usize]
    } else {
        config.slot_bonus_ranges[rarity.ordinal() as usize]
    };
    let magnitude = round_to(rng.uniform_range(min, max), 3);

    let value = if bonus_type.is_negative() {
        -magnitude
    } else {
        magnitude
    };
    PetBonus::new(bonus_type, value)
}

/// Distinct flavour attributes drawn from the pool.
pub fn roll_attributes(config: &EngineConfig, rng: &mut impl RandomSource) -> Vec<PetAttribute> {
    let (min, max) = config.attribute_count;
    let count = (min + rng.uniform_int(max.saturating_sub(min) + 1))
        .min(ATTRIBUTE_POOL.len() as u32);

    let mut remaining: Vec<usize> = (0..ATTRIBUTE_POOL.len()).collect();
    let mut attributes = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let idx = remaining.swap_remove(rng.uniform_int(remaining.len() as u32) as usize);
        let (name, description) = ATTRIBUTE_POOL[idx];
        attributes.push(PetAttribute {
            name: name.to_string(),
            description: description.to_string(),
        });
    }
    attributes
}

/// Corrupt a freshly befriended pet: set the flag and grant one extra bonus.
pub fn corrupt(pet: &Pet, config: &EngineConfig, rng: &mut impl RandomSource) -> Pet {
    let mut corrupted = pet.clone();
    corrupted.corrupted = true;
    let extra = roll_bonus(corrupted.rarity, config, rng);
    corrupted.bonuses.push(extra);
    corrupted
}

/// Weighted pick over non-negative weights. Falls back to the last
/// positive-weight index when floating-point accumulation falls short.
pub fn weighted_index(weights: &[f64], rng: &mut impl RandomSource) -> usize {
    let total: f64 = weights.iter().filter(|w| **w > 0.0).sum();
    if total <= 0.0 {
        return 0;
    }

    let roll = rng.uniform_unit() * total;
    let mut cumulative = 0.0;
    let mut last_positive = 0;
    for (i, w) in weights.iter().enumerate() {
        if *w <= 0.0 {
            continue;
        }
        cumulative += w;
        last_positive = i;
        if roll < cumulative {
            return i;
        }
    }
    last_positive
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pets::bonus::BonusType;
    use crate::pets::tables::species_rarity;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashMap;

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    #[test]
    fn test_generated_pet_is_unpersisted_and_consistent() {
        let mut rng = create_test_rng();
        let config = EngineConfig::default();
        let now = Utc::now();
        for _ in 0..200 {
            let pet = generate_pet(OwnerId(9), &config, now, &mut rng);
            assert!(pet.id.is_none());
            assert_eq!(pet.owner, OwnerId(9));
            assert_eq!(species_rarity(pet.species), pet.rarity);
            assert_eq!(
                pet.bonuses.len() as u32,
                starting_bonus_count(pet.rarity)
            );
            assert!(pet.alive);
            assert!(!pet.corrupted);
            assert_eq!(pet.found_at, now);
            assert!(pet.born_at <= now);
            assert!(pet.age(now) <= max_age(pet.species) / 4 + Duration::seconds(1));
            assert!(!pet.attributes.is_empty() && pet.attributes.len() <= 3);
        }
    }

    #[test]
    fn test_rarity_distribution_follows_weights() {
        let mut rng = create_test_rng();
        let config = EngineConfig::default();
        let mut counts: HashMap<Rarity, u32> = HashMap::new();
        for _ in 0..10_000 {
            *counts.entry(roll_rarity(&config, &mut rng)).or_insert(0) += 1;
        }
        let common = counts.get(&Rarity::Common).copied().unwrap_or(0);
        let legendary = counts.get(&Rarity::Legendary).copied().unwrap_or(0);
        assert!(common > 5_000 && common < 7_000, "common: {}", common);
        assert!(legendary < 300, "legendary: {}", legendary);
    }

    #[test]
    fn test_weighted_index_skips_zero_weights() {
        let mut rng = create_test_rng();
        for _ in 0..500 {
            let idx = weighted_index(&[0.0, 3.0, 0.0, 1.0], &mut rng);
            assert!(idx == 1 || idx == 3);
        }
    }

    #[test]
    fn test_negative_bonuses_roll_as_improvements() {
        let mut rng = create_test_rng();
        let mut config = EngineConfig::default();
        config.bonus_weights = vec![crate::config::BonusWeight::new(
            BonusType::MUTED_PENALTY,
            1.0,
        )];
        for rarity in Rarity::ALL {
            let bonus = roll_bonus(rarity, &config, &mut rng);
            assert!(bonus.value <= 0.0);
            assert!(bonus.is_beneficial());
        }
    }

    #[test]
    fn test_slot_bonus_uses_slot_range() {
        let mut rng = create_test_rng();
        let mut config = EngineConfig::default();
        config.bonus_weights = vec![crate::config::BonusWeight::new(BonusType::PET_SLOTS, 1.0)];
        for _ in 0..100 {
            let bonus = roll_bonus(Rarity::Epic, &config, &mut rng);
            assert!(bonus.value >= 0.30 && bonus.value <= 0.70, "{}", bonus.value);
        }
    }

    #[test]
    fn test_attributes_are_distinct() {
        let mut rng = create_test_rng();
        let mut config = EngineConfig::default();
        config.attribute_count = (5, 5);
        let attrs = roll_attributes(&config, &mut rng);
        assert_eq!(attrs.len(), 5);
        let mut names: Vec<&str> = attrs.iter().map(|a| a.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 5);
    }

    #[test]
    fn test_corrupt_sets_flag_and_adds_bonus() {
        let mut rng = create_test_rng();
        let config = EngineConfig::default();
        let pet = generate_pet(OwnerId(1), &config, Utc::now(), &mut rng);
        let corrupted = corrupt(&pet, &config, &mut rng);
        assert!(corrupted.corrupted);
        assert_eq!(corrupted.bonuses.len(), pet.bonuses.len() + 1);
        assert!(!pet.corrupted);
    }
}
