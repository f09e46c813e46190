//! Cross-round score and level tracking.
//!
//! The session only changes through [`Session::apply_delta`], fed by round
//! outcomes, or wholesale through [`Session::restart`].

use serde::{Deserialize, Serialize};

/// Level a fresh session starts at.
pub const INITIAL_LEVEL: u32 = 1;

/// Score and level change reported by a single guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreDelta {
    /// Signed score change. Negative deltas are clamped at zero by the session.
    pub score: i64,
    /// Level gain, 0 or 1.
    pub level: u32,
}

impl ScoreDelta {
    /// No change: the guess was ignored.
    pub const NONE: Self = Self { score: 0, level: 0 };
    /// Correct guess.
    pub const CORRECT: Self = Self { score: 5, level: 1 };
    /// Wrong guess with attempts remaining.
    pub const WRONG: Self = Self { score: -1, level: 0 };
    /// Wrong guess that used up the last attempt.
    pub const EXHAUSTED: Self = Self { score: -5, level: 0 };
}

/// Accumulated score and level for a run of rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    score: u64,
    level: u32,
}

impl Session {
    /// A fresh session: score 0, level 1.
    pub fn new() -> Self {
        Self {
            score: 0,
            level: INITIAL_LEVEL,
        }
    }

    /// Current score, never negative.
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Current level, starting at 1.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Apply a round delta. The score floors at 0; the level only grows.
    #[must_use]
    pub fn apply_delta(self, delta: ScoreDelta) -> Self {
        let score = if delta.score >= 0 {
            self.score.saturating_add(delta.score.unsigned_abs())
        } else {
            self.score.saturating_sub(delta.score.unsigned_abs())
        };
        Self {
            score,
            level: self.level.saturating_add(delta.level),
        }
    }

    /// Reset to a fresh session.
    #[must_use]
    pub fn restart(self) -> Self {
        Self::new()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
