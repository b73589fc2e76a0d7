//! Per-run counters.

use crate::pets::Rarity;
use serde::Serialize;

/// Outcome of one simulated owner.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStats {
    pub searches: u64,
    pub finds: u64,
    pub befriend_attempts: u64,
    pub befriends: u64,
    pub corruptions: u64,
    pub replacements: u64,
    pub deaths: u64,
    pub treats_fed: u64,
    pub bonuses_granted: u64,

    /// Pets found, indexed by rarity ordinal
    pub found_by_rarity: [u64; 6],

    pub final_owner_level: u32,
    pub final_pet_count: usize,
    pub final_capacity: i64,
    pub final_avg_pet_level: f64,
    pub final_max_pet_level: u32,
}

impl RunStats {
    pub fn record_find(&mut self, rarity: Rarity) {
        self.finds += 1;
        self.found_by_rarity[rarity.ordinal() as usize] += 1;
    }

    pub fn search_success_rate(&self) -> f64 {
        if self.searches == 0 {
            0.0
        } else {
            self.finds as f64 / self.searches as f64
        }
    }

    pub fn befriend_success_rate(&self) -> f64 {
        if self.befriend_attempts == 0 {
            0.0
        } else {
            self.befriends as f64 / self.befriend_attempts as f64
        }
    }
}
