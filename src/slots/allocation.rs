//! Active/disabled split under a capacity that grows with active pets.

use crate::core::constants::{BASE_PET_SLOTS, MAX_BONUS_PET_SLOTS, OWNER_LEVELS_PER_SLOT};
use crate::pets::{aggregate, BonusType, Pet, PetOwner, RowId};
use serde::{Deserialize, Serialize};

/// Result of splitting an owner's pets into active and disabled sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotAllocation {
    /// Pets that count against capacity and contribute bonuses, in priority order.
    pub active: Vec<Pet>,
    /// Pets beyond capacity, in priority order. Still owned and displayable.
    pub disabled: Vec<Pet>,
    /// Slots granted by the owner's level alone.
    pub base_capacity: i64,
    /// Capacity after the active pets' slot bonuses were applied.
    pub capacity: i64,
}

impl SlotAllocation {
    pub fn owned_count(&self) -> usize {
        self.active.len() + self.disabled.len()
    }

    pub fn is_active(&self, id: RowId) -> bool {
        self.active.iter().any(|p| p.id == Some(id))
    }

    /// Total bonus of `target` type across the active pets only.
    pub fn bonus(&self, target: BonusType) -> f64 {
        aggregate(&self.active, target)
    }

    /// Free slots left. Negative when the owner holds more pets than capacity.
    pub fn free_slots(&self) -> i64 {
        self.capacity - self.owned_count() as i64
    }
}

/// Slots granted by the owner's level: one, plus one per 20 levels.
pub fn base_capacity(owner_level: u32) -> i64 {
    (BASE_PET_SLOTS + (owner_level / OWNER_LEVELS_PER_SLOT) as i64).max(0)
}

/// Flat slots contributed by `active` pets, floored and capped at 50.
pub fn bonus_slots(active: &[Pet]) -> i64 {
    (aggregate(active, BonusType::PET_SLOTS).floor() as i64).min(MAX_BONUS_PET_SLOTS)
}

/// Decide which of the owner's pets are active.
///
/// Pets are walked in ascending priority order. Each activated pet may raise
/// capacity through its slot bonuses, so capacity is recomputed after every
/// activation. The walk is bounded by the number of pets.
///
/// The final split activates `min(capacity, pets)` pets, but always at least
/// one when the owner has any pets at all.
pub fn allocate(owner: &PetOwner, pets: &[Pet]) -> SlotAllocation {
    let mut sorted: Vec<Pet> = pets.to_vec();
    sorted.sort_by_key(|p| (p.priority, p.id));

    let base = base_capacity(owner.level);
    let mut capacity = base + bonus_slots(&[]);
    let mut active_count = 0usize;

    while active_count < sorted.len() && (active_count as i64) < capacity {
        active_count += 1;
        capacity = base + bonus_slots(&sorted[..active_count]);
    }

    let split = if sorted.is_empty() {
        0
    } else {
        (capacity.clamp(0, sorted.len() as i64) as usize).max(1)
    };

    let disabled = sorted.split_off(split);
    SlotAllocation {
        active: sorted,
        disabled,
        base_capacity: base,
        capacity,
    }
}
