//! Data-driven game balance
//!
//! Every tunable number the engine reads lives in [`Tuning`]. Tests override
//! individual fields (e.g. forcing a detection chance to 0 or 1) instead of
//! patching constants at call sites.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors reported when a [`Tuning`] would break engine invariants.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TuningError {
    /// A probability field is outside `[0, 1]`.
    #[error("{field} must be within [0, 1], got {value}")]
    Probability {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A duration or count that must be positive is zero.
    #[error("{field} must be greater than zero")]
    Zero {
        /// Name of the offending field.
        field: &'static str,
    },

    /// The starting scan interval is already below the speed-up floor.
    #[error("base_step_ms ({base}) must not be below min_step_ms ({min})")]
    StepBelowFloor {
        /// Configured starting interval.
        base: u64,
        /// Configured floor.
        min: u64,
    },
}

/// Engine-wide balance constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Scanner ===
    /// Initial time between scan steps
    pub base_step_ms: u64,
    /// Interval reduction applied per completed cycle
    pub step_decrement_ms: u64,
    /// Floor the interval never drops below
    pub min_step_ms: u64,

    // === Concealment map ===
    /// Chance a line with an error variant spawns concealing
    pub concealment_chance: f64,
    /// Chance a concealing line is cleaned by `CodeCleanup`
    pub cleanup_clear_chance: f64,

    // === Detection ===
    /// Detection chance on an exposed line
    pub exposed_detection_chance: f64,
    /// Detection chance on a concealing line
    pub concealed_detection_chance: f64,

    // === Victory ===
    pub target_cycles: u32,
    pub target_seconds: u32,

    // === Timers ===
    /// Delay between start/reset and scanner activation
    pub grace_ms: u64,
    /// Cadence of the elapsed-seconds counter
    pub counter_interval_ms: u64,
    /// Cadence of random-event checks
    pub event_check_interval_ms: u64,
    /// Minimum gap between two triggered events
    pub event_cooldown_ms: u64,
    /// Chance an eligible event check triggers
    pub event_chance: f64,
    /// How long `DebugFreeze` pauses the scanner
    pub freeze_ms: u64,
    /// How long an event stays on the notification banner
    pub event_display_ms: u64,

    // === Spawn ===
    pub start_line: u32,
    pub start_column: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_step_ms: BASE_STEP_MS,
            step_decrement_ms: STEP_DECREMENT_MS,
            min_step_ms: MIN_STEP_MS,

            concealment_chance: CONCEALMENT_CHANCE,
            cleanup_clear_chance: CLEANUP_CLEAR_CHANCE,

            exposed_detection_chance: 1.0,
            concealed_detection_chance: CONCEALED_DETECTION_CHANCE,

            target_cycles: TARGET_CYCLES,
            target_seconds: TARGET_SECONDS,

            grace_ms: GRACE_MS,
            counter_interval_ms: 1000,
            event_check_interval_ms: EVENT_CHECK_INTERVAL_MS,
            event_cooldown_ms: EVENT_COOLDOWN_MS,
            event_chance: EVENT_CHANCE,
            freeze_ms: FREEZE_MS,
            event_display_ms: EVENT_DISPLAY_MS,

            start_line: START_LINE,
            start_column: 1,
        }
    }
}

impl Tuning {
    /// Check every field against the invariants the engine relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        let probabilities = [
            ("concealment_chance", self.concealment_chance),
            ("cleanup_clear_chance", self.cleanup_clear_chance),
            ("exposed_detection_chance", self.exposed_detection_chance),
            ("concealed_detection_chance", self.concealed_detection_chance),
            ("event_chance", self.event_chance),
        ];
        for (field, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(TuningError::Probability { field, value });
            }
        }

        let positive = [
            ("min_step_ms", self.min_step_ms),
            ("counter_interval_ms", self.counter_interval_ms),
            ("event_check_interval_ms", self.event_check_interval_ms),
            ("target_cycles", u64::from(self.target_cycles)),
            ("target_seconds", u64::from(self.target_seconds)),
            ("start_line", u64::from(self.start_line)),
            ("start_column", u64::from(self.start_column)),
        ];
        if let Some(&(field, _)) = positive.iter().find(|(_, v)| *v == 0) {
            return Err(TuningError::Zero { field });
        }

        if self.base_step_ms < self.min_step_ms {
            return Err(TuningError::StepBelowFloor {
                base: self.base_step_ms,
                min: self.min_step_ms,
            });
        }

        Ok(())
    }
}
