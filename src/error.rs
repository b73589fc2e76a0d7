use crate::pets::RowId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown rarity ordinal: {0}")]
    UnknownRarity(u8),

    #[error("Unknown species: {0}")]
    UnknownSpecies(String),

    #[error("Pet {0} not found")]
    PetNotFound(RowId),

    #[error("Pet has not been persisted yet")]
    NotPersisted,

    #[error("Pet already has the highest priority")]
    AlreadyHighestPriority,

    #[error("Pet already has the lowest priority")]
    AlreadyLowestPriority,

    #[error("Pet {0} has died")]
    PetIsDead(String),

    #[error("No free pet slots: {owned} pets owned, capacity {capacity}")]
    NoFreeSlots { owned: usize, capacity: i64 },

    #[error("Pet belongs to a different owner")]
    OwnerMismatch,

    #[error("Invalid pet name: {0}")]
    InvalidName(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Persistence error: {0}")]
    Persistence(String),
}

pub type Result<T> = std::result::Result<T, PetError>;
