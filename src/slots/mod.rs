//! Pet slots: capacity allocation and priority ordering.

pub mod allocation;
pub mod priority;

pub use allocation::*;
pub use priority::*;
