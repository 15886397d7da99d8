//! Engine configuration
//!
//! Defaults reproduce the classic timing: 0.72 s per row at level 0, one
//! hundredth of a second faster per level, ten rows per level. Every field is
//! optional in JSON; missing fields take their default.

use std::time::Duration;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::board::BoundaryMode;
use crate::scoring::tick_interval;
use crate::types::{LINES_PER_LEVEL, MAX_LEVELS, MAX_TICK_SECONDS, MIN_TICK_SECONDS};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Gravity interval at level 0, in seconds
    pub max_tick_seconds: f64,
    /// Floor for the gravity interval, in seconds
    pub min_tick_seconds: f64,
    /// Each level removes `1 / max_levels` seconds from the interval
    pub max_levels: f64,
    /// Rows to clear per level-up
    pub lines_per_level: u32,
    /// Validity rule applied at the far edges of the board
    pub boundary: BoundaryMode,
    /// Seed for the default shape source
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_tick_seconds: MAX_TICK_SECONDS,
            min_tick_seconds: MIN_TICK_SECONDS,
            max_levels: MAX_LEVELS,
            lines_per_level: LINES_PER_LEVEL,
            boundary: BoundaryMode::Strict,
            seed: 1,
        }
    }
}

impl EngineConfig {
    /// Default configuration with a specific seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.max_tick_seconds.is_finite() && self.max_tick_seconds > 0.0,
            "max_tick_seconds must be a positive number, got {}",
            self.max_tick_seconds
        );
        ensure!(
            self.min_tick_seconds.is_finite() && self.min_tick_seconds > 0.0,
            "min_tick_seconds must be a positive number, got {}",
            self.min_tick_seconds
        );
        ensure!(
            self.min_tick_seconds <= self.max_tick_seconds,
            "min_tick_seconds ({}) exceeds max_tick_seconds ({})",
            self.min_tick_seconds,
            self.max_tick_seconds
        );
        ensure!(
            self.max_levels.is_finite() && self.max_levels > 0.0,
            "max_levels must be a positive number, got {}",
            self.max_levels
        );
        ensure!(self.lines_per_level > 0, "lines_per_level must be at least 1");
        Ok(())
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).context("invalid engine config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Gravity interval for `level`
    pub fn tick_interval(&self, level: u32) -> Duration {
        tick_interval(
            level,
            self.max_tick_seconds,
            self.min_tick_seconds,
            self.max_levels,
        )
    }
}
