//! Pet progression: XP curve, level-ups, and treats.

pub mod curve;
pub mod logic;

pub use curve::*;
pub use logic::*;
