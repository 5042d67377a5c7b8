//! Session configuration.
//!
//! The board layout is fixed; only the player count, the RNG seed and the
//! presentation cadence are configurable.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::error::ConfigError;

/// Presentation cadence, in milliseconds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// How long the dice spins before settling.
    pub roll_duration_ms: u64,

    /// Interval between flicker faces while spinning.
    pub flicker_interval_ms: u64,

    /// Interval between single-cell movement steps.
    pub step_interval_ms: u64,

    /// Pause after a roll resolves, with input locked, before the turn rotates.
    pub settle_delay_ms: u64,

    /// How long the settled face keeps presenting after the roll resolves.
    pub present_linger_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            roll_duration_ms: 2000,
            flicker_interval_ms: 100,
            step_interval_ms: 100,
            settle_delay_ms: 500,
            present_linger_ms: 300,
        }
    }
}

impl TimingConfig {
    #[must_use]
    pub fn roll_duration(&self) -> Duration {
        Duration::from_millis(self.roll_duration_ms)
    }

    #[must_use]
    pub fn flicker_interval(&self) -> Duration {
        Duration::from_millis(self.flicker_interval_ms)
    }

    #[must_use]
    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.step_interval_ms)
    }

    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    #[must_use]
    pub fn present_linger(&self) -> Duration {
        Duration::from_millis(self.present_linger_ms)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.roll_duration_ms == 0 {
            return Err(ConfigError::Timing("roll_duration_ms must be > 0"));
        }
        if self.flicker_interval_ms == 0 {
            return Err(ConfigError::Timing("flicker_interval_ms must be > 0"));
        }
        if self.flicker_interval_ms > self.roll_duration_ms {
            return Err(ConfigError::Timing(
                "flicker_interval_ms must not exceed roll_duration_ms",
            ));
        }
        if self.step_interval_ms == 0 {
            return Err(ConfigError::Timing("step_interval_ms must be > 0"));
        }
        // The die must be idle again by the time the turn hands over.
        if self.present_linger_ms > self.settle_delay_ms {
            return Err(ConfigError::Timing(
                "present_linger_ms must not exceed settle_delay_ms",
            ));
        }
        Ok(())
    }
}

/// Complete session configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of players (2-255).
    pub player_count: usize,

    /// Seed for the dice RNG. Same seed produces the same rolls.
    pub seed: u64,

    pub timing: TimingConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_count: 2,
            seed: 42,
            timing: TimingConfig::default(),
        }
    }
}

impl GameConfig {
    /// Create a configuration for `player_count` players with default timing.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON configuration. Missing fields use defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    /// Check the player count and timing intervals.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=255).contains(&self.player_count) {
            return Err(ConfigError::PlayerCount(self.player_count));
        }
        self.timing.validate()
    }
}
