// XP curve: XP_CURVE_BASE * rarity multiplier * level^XP_CURVE_EXPONENT
pub const XP_CURVE_BASE: f64 = 100.0;
pub const XP_CURVE_EXPONENT: f64 = 1.5;
pub const MAX_PET_LEVEL: u32 = 10_000;

// Level-up rewards
pub const FIRST_BONUS_MILESTONE_LEVEL: u32 = 10;
pub const BONUS_MILESTONE_INTERVAL: u32 = 25;
pub const BONUS_IMPROVEMENT_RATE: f64 = 0.01;

// Treats
pub const TREAT_XP_LOWER_BOUND: f64 = 100.0;
pub const TREAT_XP_LOG_BASE: f64 = 1.5;
pub const TREAT_XP_SOFTCAP_LEVEL: i64 = 50;
pub const TREAT_ROLL_STEPS: u32 = 100;

// Slots
pub const BASE_PET_SLOTS: i64 = 1;
pub const MAX_BONUS_PET_SLOTS: i64 = 50;
pub const OWNER_LEVELS_PER_SLOT: u32 = 20;

// Encounters
pub const SEARCH_BASE_FACTOR: f64 = 2.0;
pub const BEFRIEND_BASE_RATE: f64 = 0.10;
pub const CORRUPTION_CHANCE: f64 = 0.001;

// Names
pub const MAX_PET_NAME_LENGTH: usize = 32;
