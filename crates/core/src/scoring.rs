//! Scoring module - line-clear points, level progression and gravity speed
//!
//! Line clears use the classic table `{40, 100, 300, 1200} × (level + 1)`.
//! Every `lines_per_level` cleared rows raise the level by one, and each level
//! shortens the gravity interval linearly down to a configured floor.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::LINE_SCORES;

/// Outcome of the line-clear step that follows a lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClearResult {
    /// Rows removed from the board (0-4)
    pub rows_removed: u32,
    /// Points added to the score
    pub points: u32,
    /// Levels gained by this clear
    pub levels_gained: u32,
}

impl ClearResult {
    pub fn leveled_up(&self) -> bool {
        self.levels_gained > 0
    }
}

/// Calculate line clear score
/// rows: number of rows removed at once (1-4)
/// level: current level (0-based)
pub fn calculate_line_score(rows: usize, level: u32) -> u32 {
    if rows == 0 || rows >= LINE_SCORES.len() {
        return 0;
    }
    LINE_SCORES[rows].saturating_mul(level.saturating_add(1))
}

/// Per-level cleared-row counter
///
/// The counter holds rows cleared since the last level-up; it never reaches
/// `lines_per_level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LevelProgress {
    pub level: u32,
    pub cleared: u32,
}

impl LevelProgress {
    /// Count `rows` toward the next level, returning the levels gained
    pub fn add_rows(&mut self, rows: u32, lines_per_level: u32) -> u32 {
        self.cleared += rows;
        let gained = self.cleared / lines_per_level;
        if gained > 0 {
            self.level += gained;
            self.cleared %= lines_per_level;
        }
        gained
    }
}

/// Gravity interval in seconds: `max_seconds - level / max_levels`, floored at `min_seconds`
pub fn tick_seconds(level: u32, max_seconds: f64, min_seconds: f64, max_levels: f64) -> f64 {
    let seconds = max_seconds - f64::from(level) / max_levels;
    seconds.max(min_seconds)
}

/// [`tick_seconds`] as a `Duration`
pub fn tick_interval(level: u32, max_seconds: f64, min_seconds: f64, max_levels: f64) -> Duration {
    Duration::from_secs_f64(tick_seconds(level, max_seconds, min_seconds, max_levels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MAX_LEVELS, MAX_TICK_SECONDS, MIN_TICK_SECONDS};

    #[test]
    fn test_line_scores_level_0() {
        assert_eq!(calculate_line_score(0, 0), 0);
        assert_eq!(calculate_line_score(1, 0), 40);
        assert_eq!(calculate_line_score(2, 0), 100);
        assert_eq!(calculate_line_score(3, 0), 300);
        assert_eq!(calculate_line_score(4, 0), 1200);
        assert_eq!(calculate_line_score(5, 0), 0);
    }

    #[test]
    fn test_line_scores_scale_with_level() {
        assert_eq!(calculate_line_score(1, 1), 80);
        assert_eq!(calculate_line_score(4, 2), 3600);
        assert_eq!(calculate_line_score(3, 9), 3000);
    }

    #[test]
    fn test_level_progress_wraps_counter() {
        let mut progress = LevelProgress::default();
        assert_eq!(progress.add_rows(4, 10), 0);
        assert_eq!(progress.add_rows(4, 10), 0);
        assert_eq!(progress.add_rows(3, 10), 1);
        assert_eq!(progress, LevelProgress { level: 1, cleared: 1 });
    }

    #[test]
    fn test_level_progress_multiple_levels() {
        let mut progress = LevelProgress::default();
        assert_eq!(progress.add_rows(4, 2), 2);
        assert_eq!(progress, LevelProgress { level: 2, cleared: 0 });
    }

    #[test]
    fn test_tick_seconds_linear() {
        let t0 = tick_seconds(0, MAX_TICK_SECONDS, MIN_TICK_SECONDS, MAX_LEVELS);
        let t10 = tick_seconds(10, MAX_TICK_SECONDS, MIN_TICK_SECONDS, MAX_LEVELS);
        assert!((t0 - 0.72).abs() < 1e-9);
        assert!((t10 - 0.62).abs() < 1e-9);
    }

    #[test]
    fn test_tick_seconds_clamped() {
        let t = tick_seconds(500, MAX_TICK_SECONDS, MIN_TICK_SECONDS, MAX_LEVELS);
        assert_eq!(t, MIN_TICK_SECONDS);
        let d = tick_interval(500, MAX_TICK_SECONDS, MIN_TICK_SECONDS, MAX_LEVELS);
        assert!(d > Duration::ZERO);
    }
}
