//! Simulation configuration.

use crate::config::EngineConfig;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulation runs to perform
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Simulated days per run
    pub days: u32,

    /// Searches the owner attempts each day
    pub searches_per_day: u32,

    /// Treats fed to each active pet each day
    pub treats_per_day: u32,

    /// Owner level on day 0
    pub starting_owner_level: u32,

    /// Owner levels gained per simulated day
    pub owner_levels_per_day: u32,

    /// Tuning tables used for generation and bonus rolls
    pub engine: EngineConfig,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per-run lines)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            seed: None,
            days: 90,
            searches_per_day: 3,
            treats_per_day: 2,
            starting_owner_level: 0,
            owner_levels_per_day: 1,
            engine: EngineConfig::default(),
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick config for a fast balance check
    pub fn quick() -> Self {
        Self {
            num_runs: 100,
            days: 30,
            ..Default::default()
        }
    }

    /// A full year of play, long enough for deaths and late slot unlocks
    pub fn long_haul() -> Self {
        Self {
            num_runs: 200,
            days: 365,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_keep_defaults() {
        let quick = SimConfig::quick();
        assert_eq!(quick.days, 30);
        assert_eq!(quick.searches_per_day, SimConfig::default().searches_per_day);
        assert!(SimConfig::long_haul().days > SimConfig::default().days);
    }
}
