//! Finding, befriending, replacing, and losing pets.

pub mod chances;
pub mod logic;

pub use chances::*;
pub use logic::*;
