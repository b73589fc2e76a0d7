//! Small pet mutations that don't belong to a larger engine.
//!
//! Every function takes the current value and returns a new one; the caller
//! persists the result and only then adopts it.

use super::types::Pet;
use crate::core::constants::MAX_PET_NAME_LENGTH;
use crate::error::{PetError, Result};

/// Prepare a newcomer for insertion at the back of the owner's queue.
pub fn adopt(pets: &[Pet], newcomer: &Pet) -> Result<Pet> {
    if pets.iter().any(|p| p.owner != newcomer.owner) {
        return Err(PetError::OwnerMismatch);
    }
    let mut adopted = newcomer.clone();
    adopted.priority = pets.len() as u32;
    Ok(adopted)
}

/// Set or clear a pet's display name.
///
/// The name is trimmed; an empty name clears it back to the species name.
pub fn rename(pet: &Pet, name: Option<&str>) -> Result<Pet> {
    let name = name.map(str::trim).filter(|n| !n.is_empty());
    if let Some(n) = name {
        if n.chars().count() > MAX_PET_NAME_LENGTH {
            return Err(PetError::InvalidName(format!(
                "names are limited to {} characters",
                MAX_PET_NAME_LENGTH
            )));
        }
        if n.chars().any(char::is_control) {
            return Err(PetError::InvalidName(
                "names cannot contain control characters".to_string(),
            ));
        }
    }

    let mut renamed = pet.clone();
    renamed.name = name.map(str::to_string);
    Ok(renamed)
}
