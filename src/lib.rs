//! Petkeeper - pet progression engine.
//!
//! Owners find, befriend and raise pets. Capacity grows with the owner's level
//! and with the slot bonuses of the pets that are currently active; XP comes
//! from treats and levels on a rarity-scaled curve; pets age and eventually die.
//!
//! Every operation is a pure function from current values to new values.
//! Persisting the result is the caller's job, see [`repository::PetStore`].

pub mod config;
pub mod core;
pub mod encounter;
pub mod error;
pub mod pets;
pub mod progression;
pub mod random;
pub mod repository;
pub mod simulator;
pub mod slots;

pub use error::{PetError, Result};
