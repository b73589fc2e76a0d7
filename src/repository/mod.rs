//! Persistence seam for pets plus the write-through cache built on it.

pub mod json;
pub mod memory;
pub mod store;

pub use json::*;
pub use memory::*;
pub use store::*;

use crate::error::Result;
use crate::pets::{OwnerId, Pet, RowId};

/// Row storage for pets.
///
/// Implementations must report every failed write as an `Err`. A failed call
/// leaves the stored rows exactly as they were.
pub trait PetRepository {
    /// All pets of one owner, in priority order.
    fn list_by_owner(&self, owner: OwnerId) -> Result<Vec<Pet>>;

    /// Store a new pet and return its assigned row id. The pet's own `id` is ignored.
    fn insert(&mut self, pet: &Pet) -> Result<RowId>;

    /// Overwrite an existing row. The pet must already be persisted.
    fn update(&mut self, pet: &Pet) -> Result<()>;

    fn remove(&mut self, owner: OwnerId, id: RowId) -> Result<()>;
}

/// Sort pets the way every listing returns them.
pub(crate) fn sort_by_priority(pets: &mut [Pet]) {
    pets.sort_by_key(|p| (p.priority, p.id));
}
