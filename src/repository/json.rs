//! File-backed repository. All pets live in one pretty-printed JSON file
//! under `~/.petkeeper/`.

use super::{sort_by_priority, PetRepository};
use crate::error::{PetError, Result};
use crate::pets::{OwnerId, Pet, RowId};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const DEFAULT_FILE_NAME: &str = "pets.json";

/// On-disk layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PetFile {
    last_id: i64,
    pets: Vec<Pet>,
}

/// Repository that rewrites its whole file on every change.
///
/// Each write is computed on a copy of the file contents and only adopted once
/// the file has been written.
#[derive(Debug)]
pub struct JsonRepository {
    path: PathBuf,
    contents: PetFile,
}

/// Get the ~/.petkeeper/ directory path, creating it if needed.
pub fn petkeeper_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".petkeeper");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

impl JsonRepository {
    /// Open the default store at `~/.petkeeper/pets.json`.
    pub fn open_default() -> Result<Self> {
        Self::open(petkeeper_dir()?.join(DEFAULT_FILE_NAME))
    }

    /// Open a store at `path`. A missing file is an empty store; a corrupt one
    /// is an error rather than silently starting over.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let contents = match fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => PetFile::default(),
            Err(e) => return Err(e.into()),
        };
        log::info!(
            "Opened pet store {} with {} pets",
            path.display(),
            contents.pets.len()
        );
        Ok(Self { path, contents })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&mut self, next: PetFile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&next)?;
        fs::write(&self.path, json)?;
        self.contents = next;
        Ok(())
    }

    fn position(&self, owner: OwnerId, id: RowId) -> Result<usize> {
        let index = self
            .contents
            .pets
            .iter()
            .position(|p| p.id == Some(id))
            .ok_or(PetError::PetNotFound(id))?;
        if self.contents.pets[index].owner != owner {
            return Err(PetError::OwnerMismatch);
        }
        Ok(index)
    }
}

impl PetRepository for JsonRepository {
    fn list_by_owner(&self, owner: OwnerId) -> Result<Vec<Pet>> {
        let mut pets: Vec<Pet> = self
            .contents
            .pets
            .iter()
            .filter(|p| p.owner == owner)
            .cloned()
            .collect();
        sort_by_priority(&mut pets);
        Ok(pets)
    }

    fn insert(&mut self, pet: &Pet) -> Result<RowId> {
        let mut next = self.contents.clone();
        next.last_id += 1;
        let id = RowId(next.last_id);
        let mut stored = pet.clone();
        stored.id = Some(id);
        next.pets.push(stored);
        self.save(next)?;
        Ok(id)
    }

    fn update(&mut self, pet: &Pet) -> Result<()> {
        let index = self.position(pet.owner, pet.row_id()?)?;
        let mut next = self.contents.clone();
        next.pets[index] = pet.clone();
        self.save(next)
    }

    fn remove(&mut self, owner: OwnerId, id: RowId) -> Result<()> {
        let index = self.position(owner, id)?;
        let mut next = self.contents.clone();
        next.pets.remove(index);
        self.save(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::pets::generate_pet;
    use chrono::Utc;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use tempfile::TempDir;

    fn wild_pet(owner: u64) -> Pet {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        generate_pet(OwnerId(owner), &EngineConfig::default(), Utc::now(), &mut rng)
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = TempDir::new().unwrap();
        let repo = JsonRepository::open(dir.path().join("pets.json")).unwrap();
        assert!(repo.list_by_owner(OwnerId(1)).unwrap().is_empty());
    }

    #[test]
    fn test_rows_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("pets.json");

        let mut repo = JsonRepository::open(&path).unwrap();
        let first = repo.insert(&wild_pet(1)).unwrap();
        let second = repo.insert(&wild_pet(1)).unwrap();
        repo.remove(OwnerId(1), first).unwrap();

        let mut renamed = repo.list_by_owner(OwnerId(1)).unwrap().remove(0);
        renamed.name = Some("Biscuit".to_string());
        repo.update(&renamed).unwrap();

        let reopened = JsonRepository::open(&path).unwrap();
        let pets = reopened.list_by_owner(OwnerId(1)).unwrap();
        assert_eq!(pets.len(), 1);
        assert_eq!(pets[0].id, Some(second));
        assert_eq!(pets[0].name.as_deref(), Some("Biscuit"));
    }

    #[test]
    fn test_ids_not_reused_after_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pets.json");
        let mut repo = JsonRepository::open(&path).unwrap();
        let first = repo.insert(&wild_pet(1)).unwrap();
        repo.remove(OwnerId(1), first).unwrap();

        let mut reopened = JsonRepository::open(&path).unwrap();
        assert_eq!(reopened.insert(&wild_pet(1)).unwrap(), RowId(2));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pets.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(JsonRepository::open(&path), Err(PetError::Json(_))));
    }

    #[test]
    fn test_failed_write_keeps_previous_rows() {
        let dir = TempDir::new().unwrap();
        // A directory where the file should be makes every write fail.
        let path = dir.path().join("pets.json");
        let mut repo = JsonRepository::open(&path).unwrap();
        fs::create_dir_all(&path).unwrap();

        assert!(repo.insert(&wild_pet(1)).is_err());
        assert!(repo.list_by_owner(OwnerId(1)).unwrap().is_empty());
    }

    #[test]
    fn test_remove_checks_owner() {
        let dir = TempDir::new().unwrap();
        let mut repo = JsonRepository::open(dir.path().join("pets.json")).unwrap();
        let id = repo.insert(&wild_pet(1)).unwrap();
        assert!(matches!(repo.remove(OwnerId(2), id), Err(PetError::OwnerMismatch)));
        assert!(matches!(
            repo.remove(OwnerId(1), RowId(99)),
            Err(PetError::PetNotFound(RowId(99)))
        ));
    }
}
