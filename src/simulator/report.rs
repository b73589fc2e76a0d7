//! Simulation report generation.

use super::stats::RunStats;
use crate::pets::Rarity;
use serde::Serialize;

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub days: u32,

    // Encounters
    pub avg_searches: f64,
    pub avg_finds: f64,
    pub search_success_rate: f64,
    pub befriend_success_rate: f64,
    pub avg_befriends: f64,
    pub avg_replacements: f64,
    pub total_corruptions: u64,

    // Attrition
    pub avg_deaths: f64,

    // Progression
    pub avg_treats_fed: f64,
    pub avg_bonuses_granted: f64,
    pub avg_pet_level: f64,
    pub max_pet_level: u32,
    pub avg_final_pets: f64,
    pub avg_final_capacity: f64,

    /// Share of all found pets per rarity, indexed by ordinal
    pub rarity_distribution: Vec<f64>,

    // Individual run stats for detailed analysis
    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>, days: u32) -> Self {
        let num_runs = runs.len() as u32;
        let n = num_runs.max(1) as f64;
        let avg = |f: &dyn Fn(&RunStats) -> f64| runs.iter().map(f).sum::<f64>() / n;

        let total_searches: u64 = runs.iter().map(|r| r.searches).sum();
        let total_finds: u64 = runs.iter().map(|r| r.finds).sum();
        let total_attempts: u64 = runs.iter().map(|r| r.befriend_attempts).sum();
        let total_befriends: u64 = runs.iter().map(|r| r.befriends).sum();

        let mut found_by_rarity = [0u64; 6];
        for run in &runs {
            for (total, found) in found_by_rarity.iter_mut().zip(run.found_by_rarity) {
                *total += found;
            }
        }
        let rarity_distribution = found_by_rarity
            .iter()
            .map(|&count| ratio(count, total_finds))
            .collect();

        Self {
            num_runs,
            days,
            avg_searches: avg(&|r| r.searches as f64),
            avg_finds: avg(&|r| r.finds as f64),
            search_success_rate: ratio(total_finds, total_searches),
            befriend_success_rate: ratio(total_befriends, total_attempts),
            avg_befriends: avg(&|r| r.befriends as f64),
            avg_replacements: avg(&|r| r.replacements as f64),
            total_corruptions: runs.iter().map(|r| r.corruptions).sum(),
            avg_deaths: avg(&|r| r.deaths as f64),
            avg_treats_fed: avg(&|r| r.treats_fed as f64),
            avg_bonuses_granted: avg(&|r| r.bonuses_granted as f64),
            avg_pet_level: avg(&|r| r.final_avg_pet_level),
            max_pet_level: runs.iter().map(|r| r.final_max_pet_level).max().unwrap_or(0),
            avg_final_pets: avg(&|r| r.final_pet_count as f64),
            avg_final_capacity: avg(&|r| r.final_capacity as f64),
            rarity_distribution,
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                 PET BALANCE SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} owners over {} days\n\n",
            self.num_runs, self.days
        ));

        report.push_str("── ENCOUNTERS ───────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Searches:        {:.1}\n", self.avg_searches));
        report.push_str(&format!(
            "  Search Success:      {:.1}%\n",
            self.search_success_rate * 100.0
        ));
        report.push_str(&format!(
            "  Befriend Success:    {:.1}%\n",
            self.befriend_success_rate * 100.0
        ));
        report.push_str(&format!("  Avg Befriended:      {:.1}\n", self.avg_befriends));
        report.push_str(&format!("  Avg Replacements:    {:.1}\n", self.avg_replacements));
        report.push_str(&format!("  Corruptions:         {}\n\n", self.total_corruptions));

        report.push_str("── RARITY OF FOUND PETS ─────────────────────────────────────────\n");
        for rarity in Rarity::ALL {
            let share = self
                .rarity_distribution
                .get(rarity.ordinal() as usize)
                .copied()
                .unwrap_or(0.0);
            let pct = share * 100.0;
            let bar: String = "█".repeat((pct / 2.0) as usize);
            report.push_str(&format!("  {:<10} {:>6.2}% {}\n", rarity.name(), pct, bar));
        }
        report.push('\n');

        report.push_str("── PROGRESSION ──────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Treats Fed:      {:.0}\n", self.avg_treats_fed));
        report.push_str(&format!(
            "  Avg Bonuses Granted: {:.1}\n",
            self.avg_bonuses_granted
        ));
        report.push_str(&format!("  Avg Pet Level:       {:.1}\n", self.avg_pet_level));
        report.push_str(&format!("  Max Pet Level:       {}\n", self.max_pet_level));
        report.push_str(&format!("  Avg Final Pets:      {:.1}\n", self.avg_final_pets));
        report.push_str(&format!(
            "  Avg Final Capacity:  {:.1}\n\n",
            self.avg_final_capacity
        ));

        report.push_str("── ATTRITION ────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Deaths:          {:.2}\n\n", self.avg_deaths));

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        if self.befriend_success_rate < 0.2 && self.avg_finds > 0.0 {
            report.push_str("  ⚠️  Most found pets flee - befriend rate too low?\n");
        }
        if self.avg_final_pets > 0.0 && self.avg_deaths > self.avg_befriends * 0.5 {
            report.push_str("  ⚠️  Half of all befriended pets die - lifespans too short?\n");
        }
        if self.avg_final_capacity > self.avg_final_pets + 5.0 {
            report.push_str("  ⚠️  Many slots unused - searches too rare?\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}
