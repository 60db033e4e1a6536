//! Game settings and preferences
//!
//! Loaded from a JSON file next to the binary; every field is optional.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::tuning::{Tuning, TuningError};

/// Errors while loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("could not read settings: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// The settings file is not valid JSON for [`Settings`].
    #[error("invalid settings JSON: {source}")]
    Parse {
        #[from]
        source: serde_json::Error,
    },

    /// The resolved tuning breaks an engine invariant.
    #[error("invalid tuning: {source}")]
    Tuning {
        #[from]
        source: TuningError,
    },
}

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Starting time per scan step
    pub fn base_step_ms(&self) -> u64 {
        match self {
            Difficulty::Easy => 2000,
            Difficulty::Medium => 1500,
            Difficulty::Hard => 1000,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,
    /// Name recorded on the leaderboard
    pub player_name: String,
    /// Fixed RNG seed (random when absent)
    pub seed: Option<u64>,
    /// Full balance override; replaces the difficulty preset when present
    pub tuning: Option<Tuning>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            player_name: "Player1".to_string(),
            seed: None,
            tuning: None,
        }
    }
}

impl Settings {
    /// Create settings from a difficulty preset
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.tuning()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!(
            "Loaded settings from {} ({})",
            path.display(),
            settings.difficulty.as_str()
        );
        Ok(settings)
    }

    /// Resolve the balance the engine runs with
    pub fn tuning(&self) -> Result<Tuning, TuningError> {
        let tuning = match &self.tuning {
            Some(tuning) => tuning.clone(),
            None => {
                let mut tuning = Tuning::default();
                tuning.base_step_ms = self.difficulty.base_step_ms();
                tuning
            }
        };
        tuning.validate()?;
        Ok(tuning)
    }
}
