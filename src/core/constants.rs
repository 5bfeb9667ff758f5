// Tick cadence
pub const ROUND_TICK_INTERVAL_MS: u64 = 150;
pub const MARATHON_TICK_INTERVAL_MS: u64 = 100;

// Single-round battlefield
pub const ROUND_GRID_WIDTH: i32 = 30;
pub const ROUND_GRID_HEIGHT: i32 = 12;

// Combat log
pub const COMBAT_LOG_CAPACITY: usize = 200;

// Trample sampling on Move events
pub const TRAMPLE_MAX: u8 = 4;
pub const TRAMPLE_FROM_CHANCE: f64 = 0.3;
pub const TRAMPLE_TO_CHANCE: f64 = 0.2;

// Sever scatter
pub const GIB_SCATTER_RADIUS: i32 = 2;
pub const GIB_MARK_CHANCE: f64 = 0.6;

// Fading ground marks (non-permanent) disappear over this many seconds
pub const MARK_FADE_SECONDS: f64 = 12.0;

// Hit severity thresholds (damage >= value)
pub const SEVERITY_GRIEVOUS_DAMAGE: u32 = 15;
pub const SEVERITY_WOUNDING_DAMAGE: u32 = 8;
pub const SEVERITY_SCRATCHING_DAMAGE: u32 = 3;

// Motion scale
pub const REDUCED_MOTION_SCALE: f64 = 0.5;

// Base TTLs in seconds, before gore and motion scaling
pub const TTL_HIT_DEFENDER_FLASH: f64 = 0.15;
pub const TTL_HIT_DEFENDER_BLIP: f64 = 0.45;
pub const TTL_HIT_TINT: f64 = 0.4;
pub const TTL_HIT_ATTACKER_FLASH: f64 = 0.1;
pub const TTL_HIT_ATTACKER_BLIP: f64 = 0.25;
pub const TTL_BLEED_BLIP: f64 = 0.35;
pub const TTL_GIB_BLIP_MIN: f64 = 0.5;
pub const TTL_GIB_BLIP_JITTER: f64 = 0.5;
pub const TTL_SEVER_FLASH: f64 = 0.3;
pub const TTL_SEVER_BLIP: f64 = 0.7;
pub const TTL_SEVER_TINT: f64 = 0.8;
pub const TTL_DEATH_BLIP: f64 = 1.0;
pub const TTL_DEATH_TINT: f64 = 1.0;
pub const TTL_VOMIT_BLIP: f64 = 0.6;
pub const TTL_VOMIT_TINT: f64 = 0.6;
pub const TTL_MISS_BLIP: f64 = 0.25;
pub const TTL_BUMP_BLIP: f64 = 0.3;
pub const TTL_BUMP_FLASH: f64 = 0.1;
pub const TTL_BUMP_BUMPED_BLIP: f64 = 0.25;

// Tint strength relative to the gore tint opacity
pub const TINT_HIT_FACTOR: f64 = 0.3;
pub const TINT_SEVER_FACTOR: f64 = 0.5;
pub const TINT_DEATH_FACTOR: f64 = 0.4;
pub const TINT_VOMIT_FACTOR: f64 = 0.3;

// Outcome resolution
pub const SCORE_BASE: u64 = 50;
// Per-round bonus in percent of the base
pub const SCORE_ROUND_STEP_PERCENT: u64 = 15;
pub const TIER_3_MAX_RATIO: f64 = 0.10;
pub const TIER_2_MAX_RATIO: f64 = 0.25;
pub const TIER_1_MAX_RATIO: f64 = 0.50;

// Adjustment unlocks: (cumulative trophies, max adjustments), highest first
pub const ADJUSTMENT_UNLOCKS: [(u32, u32); 4] = [(30, 6), (20, 5), (12, 4), (6, 3)];
pub const BASE_MAX_ADJUSTMENTS: u32 = 2;

// Matchups
pub const MATCHUP_MIN_COUNT: u32 = 3;
pub const MATCHUP_MAX_COUNT: u32 = 8;
pub const TEAM_MIN_COUNT: u32 = 1;
pub const TEAM_MAX_COUNT: u32 = 12;

// Leaderboard
pub const LEADERBOARD_CAPACITY: usize = 20;
pub const LEADERBOARD_FILE: &str = "leaderboard_runs.json";
pub const SETTINGS_FILE: &str = "settings.json";
pub const LOG_FILE: &str = "battles.log";

// Marathon mode
pub const MARATHON_GRID_WIDTH: i32 = 16;
pub const MARATHON_GRID_HEIGHT: i32 = 6;
pub const MARATHON_TEAM_MIN: u32 = 4;
pub const MARATHON_TEAM_MAX: u32 = 6;
pub const REINFORCEMENT_COOLDOWN_TICKS: u32 = 30;
pub const DEATH_ANIMATION_TERMINAL_PHASE: u32 = 7;
pub const DEBRIS_CAP: usize = 80;
pub const DEBRIS_TRIM_TO: usize = 40;
pub const VFX_CAP: usize = 60;
pub const VFX_TRIM_TO: usize = 30;
pub const DEBRIS_DWELL_TICKS: u32 = 150;
pub const DEBRIS_FADE_PER_TICK: f64 = 0.01;
pub const DECAY_DEBRIS_OPACITY: f64 = 0.3;
pub const GIB_DEBRIS_OPACITY: f64 = 0.8;
pub const BLOOD_VFX_LIFETIME_MIN: u32 = 20;
pub const BLOOD_VFX_LIFETIME_MAX: u32 = 40;

// Glyph cache
pub const GLYPH_CACHE_CAPACITY: usize = 512;
