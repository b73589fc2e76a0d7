use super::{sort_by_priority, PetRepository};
use crate::error::{PetError, Result};
use crate::pets::{OwnerId, Pet, RowId};
use std::collections::HashMap;

/// In-memory repository. Row ids start at 1 and are never reused.
///
/// `set_failing(true)` makes every call fail without touching the rows, which
/// is how callers' failure handling gets exercised.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    rows: HashMap<RowId, Pet>,
    last_id: i64,
    failing: bool,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn check_available(&self) -> Result<()> {
        if self.failing {
            Err(PetError::Persistence(
                "memory repository is in failing mode".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

impl PetRepository for MemoryRepository {
    fn list_by_owner(&self, owner: OwnerId) -> Result<Vec<Pet>> {
        self.check_available()?;
        let mut pets: Vec<Pet> = self
            .rows
            .values()
            .filter(|p| p.owner == owner)
            .cloned()
            .collect();
        sort_by_priority(&mut pets);
        Ok(pets)
    }

    fn insert(&mut self, pet: &Pet) -> Result<RowId> {
        self.check_available()?;
        self.last_id += 1;
        let id = RowId(self.last_id);
        let mut stored = pet.clone();
        stored.id = Some(id);
        self.rows.insert(id, stored);
        Ok(id)
    }

    fn update(&mut self, pet: &Pet) -> Result<()> {
        self.check_available()?;
        let id = pet.row_id()?;
        match self.rows.get_mut(&id) {
            Some(row) if row.owner == pet.owner => {
                *row = pet.clone();
                Ok(())
            }
            Some(_) => Err(PetError::OwnerMismatch),
            None => Err(PetError::PetNotFound(id)),
        }
    }

    fn remove(&mut self, owner: OwnerId, id: RowId) -> Result<()> {
        self.check_available()?;
        match self.rows.get(&id) {
            Some(row) if row.owner == owner => {
                self.rows.remove(&id);
                Ok(())
            }
            Some(_) => Err(PetError::OwnerMismatch),
            None => Err(PetError::PetNotFound(id)),
        }
    }
}
