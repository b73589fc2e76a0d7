//! Priority reordering.
//!
//! Priorities among one owner's pets are a dense permutation of `0..N`.
//! Each operation reads the current collection and returns only the pets whose
//! priority changed, as new values for the caller to persist.

use crate::error::{PetError, Result};
use crate::pets::{Pet, RowId};

/// Outcome of abandoning a pet.
#[derive(Debug, Clone, PartialEq)]
pub struct Abandonment {
    /// The released pet, to be removed from storage.
    pub removed: Pet,
    /// Pets that moved up one place to close the gap.
    pub shifted: Vec<Pet>,
}

/// Find a pet by row id.
pub fn find_pet(pets: &[Pet], id: RowId) -> Result<&Pet> {
    pets.iter()
        .find(|p| p.id == Some(id))
        .ok_or(PetError::PetNotFound(id))
}

pub fn can_increase_priority(pet: &Pet) -> bool {
    pet.priority > 0
}

pub fn can_decrease_priority(pets: &[Pet], pet: &Pet) -> bool {
    (pet.priority as usize) + 1 < pets.len()
}

/// Move `target` to priority 0; everything previously ahead of it moves back one.
pub fn make_primary(pets: &[Pet], target: RowId) -> Result<Vec<Pet>> {
    let current = find_pet(pets, target)?.priority;
    if current == 0 {
        return Ok(Vec::new());
    }

    let mut changed = Vec::new();
    for pet in pets {
        if pet.id == Some(target) {
            let mut moved = pet.clone();
            moved.priority = 0;
            changed.push(moved);
        } else if pet.priority < current {
            let mut moved = pet.clone();
            moved.priority += 1;
            changed.push(moved);
        }
    }
    Ok(changed)
}

/// Swap `target` with the pet one place ahead of it.
pub fn increase_priority(pets: &[Pet], target: RowId) -> Result<Vec<Pet>> {
    let pet = find_pet(pets, target)?;
    if !can_increase_priority(pet) {
        return Err(PetError::AlreadyHighestPriority);
    }
    Ok(swap_with(pets, pet, pet.priority - 1))
}

/// Swap `target` with the pet one place behind it.
pub fn decrease_priority(pets: &[Pet], target: RowId) -> Result<Vec<Pet>> {
    let pet = find_pet(pets, target)?;
    if !can_decrease_priority(pets, pet) {
        return Err(PetError::AlreadyLowestPriority);
    }
    Ok(swap_with(pets, pet, pet.priority + 1))
}

fn swap_with(pets: &[Pet], pet: &Pet, new_priority: u32) -> Vec<Pet> {
    let mut changed = Vec::with_capacity(2);
    if let Some(neighbour) = pets
        .iter()
        .find(|p| p.priority == new_priority && p.id != pet.id)
    {
        let mut moved = neighbour.clone();
        moved.priority = pet.priority;
        changed.push(moved);
    }
    let mut moved = pet.clone();
    moved.priority = new_priority;
    changed.push(moved);
    changed
}

/// Release `target`; every pet behind it moves up one place.
pub fn abandon(pets: &[Pet], target: RowId) -> Result<Abandonment> {
    let removed = find_pet(pets, target)?.clone();
    let shifted = pets
        .iter()
        .filter(|p| p.id != Some(target) && p.priority > removed.priority)
        .map(|p| {
            let mut moved = p.clone();
            moved.priority -= 1;
            moved
        })
        .collect();
    Ok(Abandonment { removed, shifted })
}

/// Repair gaps or duplicates, keeping the existing relative order.
pub fn normalize_priorities(pets: &[Pet]) -> Vec<Pet> {
    let mut sorted: Vec<&Pet> = pets.iter().collect();
    sorted.sort_by_key(|p| (p.priority, p.id));
    sorted
        .into_iter()
        .enumerate()
        .filter(|(i, p)| p.priority != *i as u32)
        .map(|(i, p)| {
            let mut moved = p.clone();
            moved.priority = i as u32;
            moved
        })
        .collect()
}

/// True if priorities form exactly `0..N` with no gaps or duplicates.
pub fn is_dense(pets: &[Pet]) -> bool {
    let mut priorities: Vec<u32> = pets.iter().map(|p| p.priority).collect();
    priorities.sort_unstable();
    priorities.iter().enumerate().all(|(i, p)| *p == i as u32)
}

/// Overlay changed pets onto a collection, matching by row id.
pub fn apply_changes(pets: &[Pet], changed: &[Pet]) -> Vec<Pet> {
    pets.iter()
        .map(|p| {
            changed
                .iter()
                .find(|c| c.id.is_some() && c.id == p.id)
                .cloned()
                .unwrap_or_else(|| p.clone())
        })
        .collect()
}
