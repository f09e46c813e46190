//! Configuration for a game.

use std::ops::RangeInclusive;
use std::time::Duration;

use crate::round::{FEEDBACK_EFFECT_DURATION, MAX_ATTEMPTS};

/// Catalog ids eligible for random selection by default.
pub const DEFAULT_ID_RANGE: RangeInclusive<u32> = 1..=151;

/// Configuration for a game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Guesses allowed per round (at least 1).
    pub max_attempts: u32,
    /// How long a feedback effect stays visible.
    pub feedback_duration: Duration,
    /// RNG seed for catalog selection.
    pub seed: u64,
    /// Catalog ids to draw from.
    pub id_range: RangeInclusive<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            feedback_duration: FEEDBACK_EFFECT_DURATION,
            seed: 42,
            id_range: DEFAULT_ID_RANGE,
        }
    }
}

impl GameConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the attempts per round (clamped to at least 1).
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Set the feedback effect duration.
    pub fn with_feedback_duration(mut self, duration: Duration) -> Self {
        self.feedback_duration = duration;
        self
    }

    /// Set the catalog id range. An empty range falls back to the default.
    pub fn with_id_range(mut self, range: RangeInclusive<u32>) -> Self {
        self.id_range = if range.is_empty() {
            DEFAULT_ID_RANGE
        } else {
            range
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.max_attempts, 5);
        assert_eq!(cfg.feedback_duration, Duration::from_millis(800));
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.id_range, 1..=151);
    }

    #[test]
    fn builder_methods() {
        let cfg = GameConfig::default()
            .with_seed(7)
            .with_max_attempts(3)
            .with_id_range(1..=9)
            .with_feedback_duration(Duration::from_millis(10));
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.max_attempts, 3);
        assert_eq!(cfg.id_range, 1..=9);
        assert_eq!(cfg.feedback_duration, Duration::from_millis(10));
    }

    #[test]
    fn attempts_clamped() {
        assert_eq!(GameConfig::default().with_max_attempts(0).max_attempts, 1);
    }

    #[test]
    fn empty_range_falls_back() {
        #[allow(clippy::reversed_empty_ranges)]
        let cfg = GameConfig::default().with_id_range(10..=1);
        assert_eq!(cfg.id_range, DEFAULT_ID_RANGE);
    }
}
