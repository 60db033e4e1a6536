//! Bug Scan - a stealth game where a bug hides from a sweeping compiler scan
//!
//! Core modules:
//! - `sim`: Tick-driven engine (scan, detection, win/loss, random events)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player-facing settings and difficulty presets
//! - `leaderboard`: Ranked results of finished sessions

pub mod leaderboard;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use leaderboard::{Leaderboard, SessionRecord};
pub use settings::{Difficulty, Settings, SettingsError};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Host frame interval the native driver simulates (~60 Hz)
    pub const FRAME_MS: u64 = 16;

    /// Scanner starts at one line every 1.5s
    pub const BASE_STEP_MS: u64 = 1500;
    /// Each completed cycle shaves this off the step interval
    pub const STEP_DECREMENT_MS: u64 = 100;
    /// Scanner never steps faster than this
    pub const MIN_STEP_MS: u64 = 800;

    /// Chance an error-capable line spawns with its error variant
    pub const CONCEALMENT_CHANCE: f64 = 0.4;
    /// Chance `CodeCleanup` fixes a given error line
    pub const CLEANUP_CLEAR_CHANCE: f64 = 0.6;
    /// Hiding in an error gives 70% survival
    pub const CONCEALED_DETECTION_CHANCE: f64 = 0.3;

    /// Victory thresholds (whichever comes first)
    pub const TARGET_CYCLES: u32 = 5;
    pub const TARGET_SECONDS: u32 = 60;

    /// Countdown before the first scan
    pub const GRACE_MS: u64 = 2000;

    /// Random events
    pub const EVENT_CHECK_INTERVAL_MS: u64 = 5000;
    pub const EVENT_COOLDOWN_MS: u64 = 20_000;
    pub const EVENT_CHANCE: f64 = 0.15;
    pub const FREEZE_MS: u64 = 3000;
    pub const EVENT_DISPLAY_MS: u64 = 4000;

    /// Spawn a few lines below the top so the first sweep isn't instant death
    pub const START_LINE: u32 = 5;
}
