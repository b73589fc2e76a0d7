//! Search, befriend, replacement and death flows.
//!
//! Each flow takes the owner's current pets and returns new values. Nothing is
//! persisted here: callers write the results through a repository and only
//! then adopt them.

use super::chances::{befriend_chance, corruption_chance, death_chance, search_chance};
use crate::config::EngineConfig;
use crate::error::{PetError, Result};
use crate::pets::{corrupt, generate_pet, Pet, PetOwner, RowId};
use crate::random::RandomSource;
use crate::slots::{allocate, find_pet, SlotAllocation};
use chrono::{DateTime, Utc};

/// Whether an owner may start a search, given their current allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchEligibility {
    /// Below capacity; a befriended pet simply joins the collection.
    Open,
    /// Exactly at capacity; befriending requires evicting a pet.
    ReplaceRequired,
    /// Above capacity; searching is blocked until pets are abandoned or die.
    Full,
}

impl SearchEligibility {
    pub fn can_search(&self) -> bool {
        !matches!(self, SearchEligibility::Full)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    NothingFound,
    Found(Pet),
}

#[derive(Debug, Clone, PartialEq)]
pub enum BefriendOutcome {
    Fled,
    Befriended { pet: Pet, corrupted: bool },
}

/// An eviction paired with the pet that takes its place in the queue.
#[derive(Debug, Clone, PartialEq)]
pub struct Replacement {
    pub evicted: Pet,
    pub newcomer: Pet,
}

pub fn search_eligibility(allocation: &SlotAllocation) -> SearchEligibility {
    let owned = allocation.owned_count() as i64;
    if owned == 0 || owned < allocation.capacity {
        SearchEligibility::Open
    } else if owned == allocation.capacity {
        SearchEligibility::ReplaceRequired
    } else {
        SearchEligibility::Full
    }
}

/// Roll a search. On success a wild pet is generated for the owner.
///
/// Owners above capacity cannot search at all.
pub fn search(
    owner: &PetOwner,
    pets: &[Pet],
    config: &EngineConfig,
    now: DateTime<Utc>,
    rng: &mut impl RandomSource,
) -> Result<SearchOutcome> {
    let allocation = allocate(owner, pets);
    ensure_can_search(&allocation)?;

    let chance = search_chance(allocation.owned_count(), &allocation.active);
    if !rng.chance(chance) {
        log::debug!(
            "Search by owner {} found nothing ({:.1}% chance)",
            owner.id,
            chance * 100.0
        );
        return Ok(SearchOutcome::NothingFound);
    }

    let candidate = generate_pet(owner.id, config, now, rng);
    log::info!(
        "Owner {} found a {} {}",
        owner.id,
        candidate.rarity,
        candidate.species
    );
    Ok(SearchOutcome::Found(candidate))
}

/// Try to befriend a found candidate.
///
/// A befriended pet is corrupted with a small fixed chance. The returned pet
/// is not yet part of the collection: pass it to `adopt` when there is room,
/// or to `replace_for` when the owner is at capacity.
pub fn befriend(
    candidate: &Pet,
    owner: &PetOwner,
    pets: &[Pet],
    config: &EngineConfig,
    rng: &mut impl RandomSource,
) -> Result<BefriendOutcome> {
    if candidate.owner != owner.id {
        return Err(PetError::OwnerMismatch);
    }
    let allocation = allocate(owner, pets);
    ensure_can_search(&allocation)?;

    let chance = befriend_chance(
        candidate.rarity,
        allocation.capacity,
        allocation.owned_count(),
        &allocation.active,
        rng,
    );
    if !rng.chance(chance) {
        log::debug!("{} fled from owner {}", candidate.species, owner.id);
        return Ok(BefriendOutcome::Fled);
    }

    if rng.chance(corruption_chance()) {
        log::warn!(
            "Owner {} befriended a corrupted {}",
            owner.id,
            candidate.species
        );
        let pet = corrupt(candidate, config, rng);
        return Ok(BefriendOutcome::Befriended {
            pet,
            corrupted: true,
        });
    }

    Ok(BefriendOutcome::Befriended {
        pet: candidate.clone(),
        corrupted: false,
    })
}

/// Pets the owner may evict to make room for a newcomer.
///
/// Disabled pets are offered first. When every pet is active, any of them
/// may be replaced.
///
/// `search` and `befriend` refuse owners holding more pets than slots, so a
/// replacement reached through them always sees the active set. The disabled
/// branch serves callers that trim an over-capacity owner directly, such as
/// after losing a slot-granting pet shrinks capacity.
pub fn replacement_candidates(allocation: &SlotAllocation) -> Vec<Pet> {
    if allocation.disabled.is_empty() {
        allocation.active.clone()
    } else {
        allocation.disabled.clone()
    }
}

/// Evict `evict` and hand its priority to `newcomer`.
pub fn replace_for(pets: &[Pet], evict: RowId, newcomer: &Pet) -> Result<Replacement> {
    let evicted = find_pet(pets, evict)?.clone();
    if evicted.owner != newcomer.owner {
        return Err(PetError::OwnerMismatch);
    }

    let mut newcomer = newcomer.clone();
    newcomer.priority = evicted.priority;
    log::info!(
        "{} replaces {} at priority {}",
        newcomer.display_name(),
        evicted.display_name(),
        evicted.priority
    );
    Ok(Replacement { evicted, newcomer })
}

/// Roll death for a single pet. Returns the dead copy when it dies.
pub fn roll_death(pet: &Pet, now: DateTime<Utc>, rng: &mut impl RandomSource) -> Option<Pet> {
    let chance = death_chance(pet, now);
    if chance <= 0.0 || !rng.chance(chance) {
        return None;
    }
    let mut dead = pet.clone();
    dead.alive = false;
    Some(dead)
}

/// Run the periodic death check over an owner's pets.
///
/// Returns only the pets that died in this check, already marked dead.
pub fn death_check(pets: &[Pet], now: DateTime<Utc>, rng: &mut impl RandomSource) -> Vec<Pet> {
    let dead: Vec<Pet> = pets
        .iter()
        .filter_map(|pet| roll_death(pet, now, rng))
        .collect();
    for pet in &dead {
        log::info!(
            "{} the {} died at {} days old",
            pet.display_name(),
            pet.species,
            pet.age(now).num_days()
        );
    }
    dead
}

fn ensure_can_search(allocation: &SlotAllocation) -> Result<()> {
    if search_eligibility(allocation).can_search() {
        Ok(())
    } else {
        Err(PetError::NoFreeSlots {
            owned: allocation.owned_count(),
            capacity: allocation.capacity,
        })
    }
}
