//! Owner-keyed cache in front of a `PetRepository`.
//!
//! Every commit writes through the repository first. The cache adopts the new
//! value only after the write succeeded, so it never shows unsaved state.

use super::PetRepository;
use crate::encounter::Replacement;
use crate::error::Result;
use crate::pets::{OwnerId, Pet, RowId};
use crate::slots::Abandonment;
use std::collections::HashMap;

pub struct PetStore<R: PetRepository> {
    repository: R,
    cache: HashMap<OwnerId, Vec<Pet>>,
}

impl<R: PetRepository> PetStore<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            cache: HashMap::new(),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn repository_mut(&mut self) -> &mut R {
        &mut self.repository
    }

    /// Load (or reload) one owner's pets into the cache.
    pub fn load_owner(&mut self, owner: OwnerId) -> Result<&[Pet]> {
        let pets = self.repository.list_by_owner(owner).map_err(|e| {
            log::warn!("Failed to load pets for owner {}: {}", owner, e);
            e
        })?;
        log::info!("Loaded {} pets for owner {}", pets.len(), owner);
        let entry = self.cache.entry(owner).or_default();
        *entry = pets;
        Ok(entry.as_slice())
    }

    /// Cached pets of `owner`, in priority order. Empty if never loaded.
    pub fn pets_of(&self, owner: OwnerId) -> &[Pet] {
        self.cache.get(&owner).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Persist a new pet. Returns the stored copy carrying its row id.
    pub fn commit_insert(&mut self, pet: &Pet) -> Result<Pet> {
        let id = self.repository.insert(pet).map_err(|e| {
            log::warn!("Failed to insert {} for owner {}: {}", pet.species, pet.owner, e);
            e
        })?;

        let mut stored = pet.clone();
        stored.id = Some(id);
        let pets = self.cache.entry(stored.owner).or_default();
        pets.push(stored.clone());
        sort(pets);
        Ok(stored)
    }

    pub fn commit_update(&mut self, pet: &Pet) -> Result<()> {
        self.repository.update(pet).map_err(|e| {
            log::warn!("Failed to update {} ({:?}): {}", pet.display_name(), pet.id, e);
            e
        })?;

        let pets = self.cache.entry(pet.owner).or_default();
        match pets.iter_mut().find(|p| p.id == pet.id) {
            Some(cached) => *cached = pet.clone(),
            None => pets.push(pet.clone()),
        }
        sort(pets);
        Ok(())
    }

    /// Persist several updates in order. Stops at the first failure; updates
    /// committed before it stay committed.
    pub fn commit_updates(&mut self, pets: &[Pet]) -> Result<()> {
        for pet in pets {
            self.commit_update(pet)?;
        }
        Ok(())
    }

    pub fn commit_remove(&mut self, owner: OwnerId, id: RowId) -> Result<()> {
        self.repository.remove(owner, id).map_err(|e| {
            log::warn!("Failed to remove pet {} of owner {}: {}", id, owner, e);
            e
        })?;

        if let Some(pets) = self.cache.get_mut(&owner) {
            pets.retain(|p| p.id != Some(id));
        }
        Ok(())
    }

    /// Close the priority gap, then remove the abandoned pet.
    ///
    /// If any write fails, the shifts already written are restored, so the
    /// stored priorities stay dense and the cache is left as it was.
    pub fn commit_abandonment(&mut self, abandonment: &Abandonment) -> Result<()> {
        let removed = &abandonment.removed;
        let removed_id = removed.row_id()?;
        let previous: Vec<Pet> = abandonment
            .shifted
            .iter()
            .map(|pet| {
                let mut before = pet.clone();
                before.priority += 1;
                before
            })
            .collect();

        for (written, pet) in abandonment.shifted.iter().enumerate() {
            if let Err(e) = self.repository.update(pet) {
                log::warn!("Failed to shift {} ({:?}): {}", pet.display_name(), pet.id, e);
                self.restore(&previous[..written]);
                return Err(e);
            }
        }
        if let Err(e) = self.repository.remove(removed.owner, removed_id) {
            log::warn!("Failed to remove pet {} of owner {}: {}", removed_id, removed.owner, e);
            self.restore(&previous);
            return Err(e);
        }

        let pets = self.cache.entry(removed.owner).or_default();
        pets.retain(|p| p.id != Some(removed_id));
        for shifted in &abandonment.shifted {
            if let Some(cached) = pets.iter_mut().find(|p| p.id == shifted.id) {
                *cached = shifted.clone();
            }
        }
        sort(pets);
        Ok(())
    }

    /// Insert the newcomer, then evict the replaced pet.
    ///
    /// A failed eviction removes the newcomer again, so the owner keeps
    /// exactly the pets they had.
    pub fn commit_replacement(&mut self, replacement: &Replacement) -> Result<Pet> {
        let evicted = &replacement.evicted;
        let evicted_id = evicted.row_id()?;
        let newcomer = &replacement.newcomer;

        let id = self.repository.insert(newcomer).map_err(|e| {
            log::warn!("Failed to insert {} for owner {}: {}", newcomer.species, newcomer.owner, e);
            e
        })?;
        if let Err(e) = self.repository.remove(evicted.owner, evicted_id) {
            log::warn!("Failed to evict pet {} of owner {}: {}", evicted_id, evicted.owner, e);
            if let Err(undo) = self.repository.remove(newcomer.owner, id) {
                log::warn!("Failed to withdraw newcomer {}: {}", id, undo);
            }
            return Err(e);
        }

        let mut stored = newcomer.clone();
        stored.id = Some(id);
        let pets = self.cache.entry(evicted.owner).or_default();
        pets.retain(|p| p.id != Some(evicted_id));
        pets.push(stored.clone());
        sort(pets);
        Ok(stored)
    }

    /// Write back earlier versions of pets, newest change first.
    fn restore(&mut self, previous: &[Pet]) {
        for pet in previous.iter().rev() {
            if let Err(e) = self.repository.update(pet) {
                log::warn!("Failed to restore {} ({:?}): {}", pet.display_name(), pet.id, e);
            }
        }
    }
}

fn sort(pets: &mut [Pet]) {
    super::sort_by_priority(pets);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::encounter::replace_for;
    use crate::error::PetError;
    use crate::pets::{adopt, generate_pet, rename};
    use crate::repository::MemoryRepository;
    use crate::slots::{abandon, is_dense};
    use chrono::Utc;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const OWNER: OwnerId = OwnerId(5);

    /// Memory rows behind one-shot failures on chosen operations.
    #[derive(Default)]
    struct Flaky {
        inner: MemoryRepository,
        fail_next_insert: bool,
        fail_next_remove: bool,
        /// Updates allowed through before one fails.
        fail_update_after: Option<usize>,
    }

    fn refused(operation: &str) -> PetError {
        PetError::Persistence(format!("{} refused", operation))
    }

    impl PetRepository for Flaky {
        fn list_by_owner(&self, owner: OwnerId) -> Result<Vec<Pet>> {
            self.inner.list_by_owner(owner)
        }

        fn insert(&mut self, pet: &Pet) -> Result<RowId> {
            if std::mem::take(&mut self.fail_next_insert) {
                return Err(refused("insert"));
            }
            self.inner.insert(pet)
        }

        fn update(&mut self, pet: &Pet) -> Result<()> {
            match self.fail_update_after {
                Some(0) => {
                    self.fail_update_after = None;
                    Err(refused("update"))
                }
                Some(n) => {
                    self.fail_update_after = Some(n - 1);
                    self.inner.update(pet)
                }
                None => self.inner.update(pet),
            }
        }

        fn remove(&mut self, owner: OwnerId, id: RowId) -> Result<()> {
            if std::mem::take(&mut self.fail_next_remove) {
                return Err(refused("remove"));
            }
            self.inner.remove(owner, id)
        }
    }

    fn fill<R: PetRepository>(store: &mut PetStore<R>, count: usize) {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        for _ in 0..count {
            let wild = generate_pet(OWNER, &EngineConfig::default(), Utc::now(), &mut rng);
            let adopted = adopt(store.pets_of(OWNER), &wild).unwrap();
            store.commit_insert(&adopted).unwrap();
        }
    }

    fn store_with(count: usize) -> PetStore<MemoryRepository> {
        let mut store = PetStore::new(MemoryRepository::new());
        fill(&mut store, count);
        store
    }

    fn flaky_store_with(count: usize) -> PetStore<Flaky> {
        let mut store = PetStore::new(Flaky::default());
        fill(&mut store, count);
        store
    }

    fn newcomer() -> Pet {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        generate_pet(OWNER, &EngineConfig::default(), Utc::now(), &mut rng)
    }

    #[test]
    fn test_insert_adopts_into_cache() {
        let store = store_with(3);
        let pets = store.pets_of(OWNER);
        assert_eq!(pets.len(), 3);
        let priorities: Vec<u32> = pets.iter().map(|p| p.priority).collect();
        assert_eq!(priorities, vec![0, 1, 2]);
        assert!(pets.iter().all(|p| p.is_persisted()));
    }

    #[test]
    fn test_failed_update_leaves_cache_untouched() {
        let mut store = store_with(1);
        let original = store.pets_of(OWNER)[0].clone();
        let renamed = rename(&original, Some("Pebble")).unwrap();

        store.repository_mut().set_failing(true);
        assert!(matches!(
            store.commit_update(&renamed),
            Err(PetError::Persistence(_))
        ));
        assert_eq!(store.pets_of(OWNER)[0], original);

        store.repository_mut().set_failing(false);
        store.commit_update(&renamed).unwrap();
        assert_eq!(store.pets_of(OWNER)[0].name.as_deref(), Some("Pebble"));
    }

    #[test]
    fn test_failed_insert_adds_nothing() {
        let mut store = store_with(1);
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let wild = generate_pet(OWNER, &EngineConfig::default(), Utc::now(), &mut rng);

        store.repository_mut().set_failing(true);
        assert!(store.commit_insert(&wild).is_err());
        assert_eq!(store.pets_of(OWNER).len(), 1);
    }

    #[test]
    fn test_abandonment_round_trip() {
        let mut store = store_with(4);
        let target = store.pets_of(OWNER)[1].row_id().unwrap();
        let abandonment = abandon(store.pets_of(OWNER), target).unwrap();
        store.commit_abandonment(&abandonment).unwrap();

        let reloaded = store.load_owner(OWNER).unwrap();
        let priorities: Vec<u32> = reloaded.iter().map(|p| p.priority).collect();
        assert_eq!(priorities, vec![0, 1, 2]);
        assert!(reloaded.iter().all(|p| p.id != Some(target)));
    }

    #[test]
    fn test_load_unknown_owner_is_empty() {
        let mut store = store_with(2);
        assert!(store.load_owner(OwnerId(999)).unwrap().is_empty());
        assert!(store.pets_of(OwnerId(1000)).is_empty());
    }

    #[test]
    fn test_replacement_swaps_in_newcomer() {
        let mut store = store_with(2);
        let evicted = store.pets_of(OWNER)[1].row_id().unwrap();
        let replacement = replace_for(store.pets_of(OWNER), evicted, &newcomer()).unwrap();

        let stored = store.commit_replacement(&replacement).unwrap();
        assert_eq!(stored.priority, 1);
        let reloaded = store.repository().list_by_owner(OWNER).unwrap();
        assert_eq!(reloaded, store.pets_of(OWNER));
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.iter().all(|p| p.id != Some(evicted)));
        assert!(is_dense(&reloaded));
    }

    #[test]
    fn test_failed_insert_keeps_evicted_pet() {
        let mut store = flaky_store_with(1);
        let before = store.repository().list_by_owner(OWNER).unwrap();
        let evicted = before[0].row_id().unwrap();
        let replacement = replace_for(store.pets_of(OWNER), evicted, &newcomer()).unwrap();

        store.repository_mut().fail_next_insert = true;
        assert!(matches!(
            store.commit_replacement(&replacement),
            Err(PetError::Persistence(_))
        ));
        assert_eq!(store.repository().list_by_owner(OWNER).unwrap(), before);
        assert_eq!(store.pets_of(OWNER), before.as_slice());
    }

    #[test]
    fn test_failed_eviction_withdraws_newcomer() {
        let mut store = flaky_store_with(2);
        let before = store.repository().list_by_owner(OWNER).unwrap();
        let evicted = before[0].row_id().unwrap();
        let replacement = replace_for(store.pets_of(OWNER), evicted, &newcomer()).unwrap();

        store.repository_mut().fail_next_remove = true;
        assert!(store.commit_replacement(&replacement).is_err());
        assert_eq!(store.repository().list_by_owner(OWNER).unwrap(), before);
        assert_eq!(store.pets_of(OWNER), before.as_slice());
    }

    #[test]
    fn test_failed_shift_restores_priorities() {
        let mut store = flaky_store_with(4);
        let before = store.repository().list_by_owner(OWNER).unwrap();
        let target = before[0].row_id().unwrap();
        let abandonment = abandon(store.pets_of(OWNER), target).unwrap();
        assert_eq!(abandonment.shifted.len(), 3);

        store.repository_mut().fail_update_after = Some(1);
        assert!(store.commit_abandonment(&abandonment).is_err());
        let after = store.repository().list_by_owner(OWNER).unwrap();
        assert_eq!(after, before);
        assert!(is_dense(&after));
        assert_eq!(store.pets_of(OWNER), before.as_slice());
    }

    #[test]
    fn test_failed_removal_restores_shifts() {
        let mut store = flaky_store_with(3);
        let before = store.repository().list_by_owner(OWNER).unwrap();
        let target = before[1].row_id().unwrap();
        let abandonment = abandon(store.pets_of(OWNER), target).unwrap();

        store.repository_mut().fail_next_remove = true;
        assert!(store.commit_abandonment(&abandonment).is_err());
        assert_eq!(store.repository().list_by_owner(OWNER).unwrap(), before);
        assert_eq!(store.pets_of(OWNER), before.as_slice());
    }
}
