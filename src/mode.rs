use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Difficulty mode chosen before a session starts
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    #[default]
    Beginner,
    Medium,
    Advanced,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Beginner, Mode::Medium, Mode::Advanced];

    /// Seconds on the clock when a session starts
    pub fn initial_secs(&self) -> f64 {
        match self {
            Mode::Beginner => 60.0,
            Mode::Medium => 20.0,
            Mode::Advanced => 10.0,
        }
    }

    /// Countdown resolution. Advanced ticks finer so banked fractions show up.
    pub fn tick(&self) -> Duration {
        match self {
            Mode::Advanced => Duration::from_millis(100),
            Mode::Beginner | Mode::Medium => Duration::from_millis(1000),
        }
    }

    pub fn tick_secs(&self) -> f64 {
        self.tick().as_secs_f64()
    }

    /// Whether targets are words of a sentence rather than single keys
    pub fn is_word_mode(&self) -> bool {
        !matches!(self, Mode::Beginner)
    }

    pub fn word_multiplier(&self) -> u32 {
        match self {
            Mode::Medium => 2,
            Mode::Beginner | Mode::Advanced => 1,
        }
    }

    /// Store key of the ranked list this mode's results are posted to
    pub fn board_key(&self) -> &'static str {
        match self {
            Mode::Advanced => "hrtm_board_advanced",
            Mode::Beginner | Mode::Medium => "hrtm_board_beginner",
        }
    }

    /// Ties on the advanced board are broken by WPM instead of level
    pub fn ranks_by_wpm(&self) -> bool {
        matches!(self, Mode::Advanced)
    }
}
