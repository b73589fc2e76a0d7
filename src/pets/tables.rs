//! Static game tables: pure lookups over the pet enums.

use super::types::{Rarity, Species};
use chrono::Duration;

/// Number of bonuses a freshly generated pet starts with.
pub fn starting_bonus_count(rarity: Rarity) -> u32 {
    match rarity {
        Rarity::Common => 1,
        Rarity::Uncommon => 1,
        Rarity::Rare => 2,
        Rarity::Epic => 2,
        Rarity::Legendary => 3,
        Rarity::Mythic => 4,
    }
}

/// Embed colour for a rarity tier, as 0xRRGGBB.
pub fn display_colour(rarity: Rarity) -> u32 {
    match rarity {
        Rarity::Common => 0x95A5A6,
        Rarity::Uncommon => 0x2ECC71,
        Rarity::Rare => 0x3498DB,
        Rarity::Epic => 0x9B59B6,
        Rarity::Legendary => 0xF1C40F,
        Rarity::Mythic => 0xE74C3C,
    }
}

/// Every species has a fixed rarity.
pub fn species_rarity(species: Species) -> Rarity {
    match species {
        Species::Cat | Species::Dog | Species::Hamster => Rarity::Common,
        Species::Rabbit | Species::Parrot | Species::Ferret => Rarity::Uncommon,
        Species::Fox | Species::Owl | Species::Tortoise => Rarity::Rare,
        Species::Wolf | Species::Panther | Species::Axolotl => Rarity::Epic,
        Species::Dragon | Species::Phoenix | Species::Unicorn => Rarity::Legendary,
        Species::Kirin | Species::Leviathan | Species::Thunderbird => Rarity::Mythic,
    }
}

/// Species that belong to a rarity tier, in table order.
pub fn species_of_rarity(rarity: Rarity) -> Vec<Species> {
    Species::ALL
        .iter()
        .copied()
        .filter(|s| species_rarity(*s) == rarity)
        .collect()
}

/// Natural lifespan of a species.
pub fn max_age(species: Species) -> Duration {
    let days = match species {
        Species::Cat => 120,
        Species::Dog => 110,
        Species::Hamster => 45,
        Species::Rabbit => 90,
        Species::Parrot => 200,
        Species::Ferret => 75,
        Species::Fox => 100,
        Species::Owl => 150,
        Species::Tortoise => 365,
        Species::Wolf => 130,
        Species::Panther => 140,
        Species::Axolotl => 160,
        Species::Dragon => 540,
        Species::Phoenix => 500,
        Species::Unicorn => 450,
        Species::Kirin => 730,
        Species::Leviathan => 900,
        Species::Thunderbird => 660,
    };
    Duration::days(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_bonus_count_table() {
        assert_eq!(starting_bonus_count(Rarity::Common), 1);
        assert_eq!(starting_bonus_count(Rarity::Uncommon), 1);
        assert_eq!(starting_bonus_count(Rarity::Rare), 2);
        assert_eq!(starting_bonus_count(Rarity::Epic), 2);
        assert_eq!(starting_bonus_count(Rarity::Legendary), 3);
    }

    #[test]
    fn test_starting_bonus_count_at_least_one() {
        for rarity in Rarity::ALL {
            assert!(starting_bonus_count(rarity) >= 1);
        }
    }

    #[test]
    fn test_every_rarity_has_species() {
        for rarity in Rarity::ALL {
            assert!(
                !species_of_rarity(rarity).is_empty(),
                "{} has no species",
                rarity
            );
        }
    }

    #[test]
    fn test_max_age_positive() {
        for species in Species::ALL {
            assert!(max_age(species) > Duration::zero());
        }
    }

    #[test]
    fn test_display_colours_distinct() {
        let mut colours: Vec<u32> = Rarity::ALL.iter().map(|r| display_colour(*r)).collect();
        colours.sort();
        colours.dedup();
        assert_eq!(colours.len(), Rarity::ALL.len());
    }
}
