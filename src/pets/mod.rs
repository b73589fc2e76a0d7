//! Pet system: data model, static tables, bonuses, and generation.

pub mod bonus;
pub mod generation;
pub mod logic;
pub mod names;
pub mod tables;
pub mod types;

pub use bonus::*;
pub use generation::*;
pub use logic::*;
pub use tables::*;
pub use types::*;
