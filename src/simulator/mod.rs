//! Pet balance simulator for Monte Carlo analysis.
//!
//! Run thousands of simulated owners to analyze:
//! - Rarity mix of found pets
//! - Search and befriend success rates
//! - Death and corruption frequency
//! - Pet levels and slot capacity over time
//!
//! Runs drive the same encounter, progression and slot code a live owner
//! hits, through an in-memory `PetStore`.

mod config;
mod report;
mod runner;
mod stats;

pub use config::SimConfig;
pub use report::SimReport;
pub use runner::run_simulation;
pub use stats::RunStats;
