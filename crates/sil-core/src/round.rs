//! The round engine: one guess-the-entity episode from start to reveal.
//!
//! A round moves `Initializing -> AwaitingGuess -> Revealed`. Transitions
//! consume the round and hand back the next one, so callers always hold a
//! consistent snapshot.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::cue::Cue;
use crate::entity::Entity;
use crate::session::ScoreDelta;

/// Guesses allowed per round unless configured otherwise.
pub const MAX_ATTEMPTS: u32 = 5;

/// How long a feedback effect stays visible before it expires.
pub const FEEDBACK_EFFECT_DURATION: Duration = Duration::from_millis(800);

/// Transient visual tag for the presentation layer. Never read by game logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum FeedbackEffect {
    /// Nothing to show.
    #[default]
    None,
    /// The entity was guessed.
    Success,
    /// The round was lost.
    Failure,
}

/// Result of the most recently evaluated guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Outcome {
    /// The guess named the entity.
    Correct,
    /// Wrong guess, more attempts remain.
    Incorrect {
        /// Attempts used so far, including this one.
        attempt: u32,
        /// Attempts allowed in the round.
        max_attempts: u32,
    },
    /// Wrong guess on the last attempt; the entity is revealed.
    Exhausted {
        /// The entity's name.
        name: String,
    },
}

impl Outcome {
    /// The audio cue announcing this outcome.
    pub fn cue(&self) -> Cue {
        match self {
            Outcome::Correct => Cue::Correct,
            Outcome::Incorrect { .. } | Outcome::Exhausted { .. } => Cue::Wrong,
        }
    }

    /// Whether this outcome ends the round.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Incorrect { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Correct => write!(f, "Correct!"),
            Outcome::Incorrect {
                attempt,
                max_attempts,
            } => write!(f, "Incorrect! Try again ({attempt}/{max_attempts})"),
            Outcome::Exhausted { name } => write!(f, "Out of attempts! It was {name}"),
        }
    }
}

/// Where a round is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// No entity loaded yet; guesses are rejected.
    Initializing,
    /// Waiting for the player to guess.
    AwaitingGuess,
    /// Terminal: the entity has been guessed or attempts ran out.
    Revealed,
}

/// State of a single round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    entity: Option<Entity>,
    guess_text: String,
    attempts_used: u32,
    max_attempts: u32,
    revealed: bool,
    outcome: Option<Outcome>,
    feedback_effect: FeedbackEffect,
}

impl Round {
    /// A round with no entity yet, e.g. while the first fetch is pending.
    pub fn initializing(max_attempts: u32) -> Self {
        Self {
            entity: None,
            guess_text: String::new(),
            attempts_used: 0,
            max_attempts: max_attempts.max(1),
            revealed: false,
            outcome: None,
            feedback_effect: FeedbackEffect::None,
        }
    }

    /// A fresh round hiding `entity`.
    pub fn start(entity: Entity, max_attempts: u32) -> Self {
        Self {
            entity: Some(entity),
            ..Self::initializing(max_attempts)
        }
    }

    /// The hidden entity, if loaded.
    pub fn entity(&self) -> Option<&Entity> {
        self.entity.as_ref()
    }

    /// The last submitted guess text.
    pub fn guess_text(&self) -> &str {
        &self.guess_text
    }

    /// Guesses evaluated so far.
    pub fn attempts_used(&self) -> u32 {
        self.attempts_used
    }

    /// Guesses allowed in this round.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Guesses left before the round is lost.
    pub fn attempts_remaining(&self) -> u32 {
        self.max_attempts - self.attempts_used
    }

    /// Whether the round reached a terminal outcome.
    pub fn revealed(&self) -> bool {
        self.revealed
    }

    /// The last evaluated outcome.
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Human-readable outcome, empty before the first guess.
    pub fn outcome_message(&self) -> String {
        self.outcome
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    /// The active feedback effect.
    pub fn feedback_effect(&self) -> FeedbackEffect {
        self.feedback_effect
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> RoundPhase {
        match (&self.entity, self.revealed) {
            (None, _) => RoundPhase::Initializing,
            (Some(_), false) => RoundPhase::AwaitingGuess,
            (Some(_), true) => RoundPhase::Revealed,
        }
    }

    /// Whether [`Round::submit_guess`] would evaluate a guess right now.
    pub fn accepts_guesses(&self) -> bool {
        self.phase() == RoundPhase::AwaitingGuess
    }

    /// Evaluate a guess.
    ///
    /// Ignored (unchanged round, [`ScoreDelta::NONE`]) when the round is
    /// revealed or has no entity. Otherwise the attempt counter is bumped
    /// before the outcome is classified, so a wrong final guess reveals the
    /// entity in the same call.
    #[must_use]
    pub fn submit_guess(mut self, guess: &str) -> (Self, ScoreDelta) {
        let (matched, name) = match &self.entity {
            Some(entity) if !self.revealed => (entity.matches(guess), entity.name().to_string()),
            _ => return (self, ScoreDelta::NONE),
        };

        self.guess_text = guess.to_string();
        self.attempts_used += 1;

        let delta = if matched {
            self.revealed = true;
            self.outcome = Some(Outcome::Correct);
            self.feedback_effect = FeedbackEffect::Success;
            ScoreDelta::CORRECT
        } else if self.attempts_used >= self.max_attempts {
            self.revealed = true;
            self.outcome = Some(Outcome::Exhausted { name });
            self.feedback_effect = FeedbackEffect::Failure;
            ScoreDelta::EXHAUSTED
        } else {
            self.outcome = Some(Outcome::Incorrect {
                attempt: self.attempts_used,
                max_attempts: self.max_attempts,
            });
            self.feedback_effect = FeedbackEffect::None;
            ScoreDelta::WRONG
        };

        (self, delta)
    }

    /// Whether the player may move on to the next round.
    pub fn advance(&self) -> bool {
        self.revealed
    }

    /// Drop the feedback effect once its display time is over.
    #[must_use]
    pub fn with_feedback_cleared(mut self) -> Self {
        self.feedback_effect = FeedbackEffect::None;
        self
    }
}

impl Default for Round {
    fn default() -> Self {
        Self::initializing(MAX_ATTEMPTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pikachu() -> Round {
        Round::start(Entity::new("pikachu", "25.png").unwrap(), MAX_ATTEMPTS)
    }

    #[test]
    fn fresh_round_is_clean() {
        let r = pikachu();
        assert_eq!(r.phase(), RoundPhase::AwaitingGuess);
        assert_eq!(r.attempts_used(), 0);
        assert_eq!(r.guess_text(), "");
        assert_eq!(r.outcome_message(), "");
        assert_eq!(r.feedback_effect(), FeedbackEffect::None);
        assert!(!r.revealed());
    }

    #[test]
    fn correct_guess_reveals() {
        let (r, delta) = pikachu().submit_guess("Pikachu ");
        assert!(r.revealed());
        assert_eq!(r.phase(), RoundPhase::Revealed);
        assert_eq!(r.attempts_used(), 1);
        assert_eq!(delta, ScoreDelta::CORRECT);
        assert_eq!(r.outcome(), Some(&Outcome::Correct));
        assert_eq!(r.feedback_effect(), FeedbackEffect::Success);
    }

    #[test]
    fn wrong_guess_keeps_round_open() {
        let (r, delta) = pikachu().submit_guess("raichu");
        assert!(!r.revealed());
        assert_eq!(delta, ScoreDelta::WRONG);
        assert_eq!(r.attempts_remaining(), 4);
        assert_eq!(r.feedback_effect(), FeedbackEffect::None);
        assert_eq!(r.guess_text(), "raichu");
        insta::assert_snapshot!(r.outcome_message(), @"Incorrect! Try again (1/5)");
    }

    #[test]
    fn five_misses_exhaust_the_round() {
        let mut r = pikachu();
        let mut deltas = Vec::new();
        for guess in ["bulbasaur", "charmander", "squirtle", "eevee", "snorlax"] {
            let (next, delta) = r.submit_guess(guess);
            r = next;
            deltas.push(delta.score);
        }
        assert_eq!(r.attempts_used(), 5);
        assert!(r.revealed());
        assert!(r.outcome_message().contains("pikachu"));
        assert_eq!(r.feedback_effect(), FeedbackEffect::Failure);
        assert_eq!(deltas, vec![-1, -1, -1, -1, -5]);
        assert_eq!(deltas.iter().sum::<i64>(), -9);
    }

    #[test]
    fn correct_on_last_attempt_wins() {
        let mut r = pikachu();
        for guess in ["a", "b", "c", "d"] {
            r = r.submit_guess(guess).0;
        }
        let (r, delta) = r.submit_guess("PIKACHU");
        assert_eq!(delta, ScoreDelta::CORRECT);
        assert_eq!(r.outcome(), Some(&Outcome::Correct));
    }

    #[test]
    fn guesses_after_reveal_are_ignored() {
        let (r, _) = pikachu().submit_guess("pikachu");
        let (r2, delta) = r.clone().submit_guess("pikachu");
        assert_eq!(delta, ScoreDelta::NONE);
        assert_eq!(r2, r);
        let (r3, delta) = r2.submit_guess("raichu");
        assert_eq!(delta, ScoreDelta::NONE);
        assert_eq!(r3.attempts_used(), 1);
    }

    #[test]
    fn initializing_round_ignores_guesses() {
        let r = Round::initializing(MAX_ATTEMPTS);
        assert_eq!(r.phase(), RoundPhase::Initializing);
        let (r2, delta) = r.clone().submit_guess("pikachu");
        assert_eq!(delta, ScoreDelta::NONE);
        assert_eq!(r2, r);
    }

    #[test]
    fn advance_only_after_reveal() {
        let r = pikachu();
        assert!(!r.advance());
        let (r, _) = r.submit_guess("pikachu");
        assert!(r.advance());
        assert!(!Round::default().advance());
    }

    #[test]
    fn feedback_clear_leaves_logic_state() {
        let (r, _) = pikachu().submit_guess("pikachu");
        let cleared = r.clone().with_feedback_cleared();
        assert_eq!(cleared.feedback_effect(), FeedbackEffect::None);
        assert_eq!(cleared.revealed(), r.revealed());
        assert_eq!(cleared.attempts_used(), r.attempts_used());
        assert_eq!(cleared.outcome(), r.outcome());
    }

    #[test]
    fn outcome_messages() {
        insta::assert_snapshot!(Outcome::Correct.to_string(), @"Correct!");
        insta::assert_snapshot!(
            Outcome::Exhausted { name: "mew".into() }.to_string(),
            @"Out of attempts! It was mew"
        );
    }

    #[test]
    fn outcome_cues() {
        assert_eq!(Outcome::Correct.cue(), Cue::Correct);
        assert_eq!(
            Outcome::Incorrect {
                attempt: 1,
                max_attempts: 5
            }
            .cue(),
            Cue::Wrong
        );
        assert!(Outcome::Exhausted { name: "x".into() }.is_terminal());
    }

    #[test]
    fn max_attempts_at_least_one() {
        let r = Round::start(Entity::new("mew", "").unwrap(), 0);
        assert_eq!(r.max_attempts(), 1);
        let (r, delta) = r.submit_guess("mewtwo");
        assert!(r.revealed());
        assert_eq!(delta, ScoreDelta::EXHAUSTED);
    }

    proptest! {
        #[test]
        fn attempts_step_by_one_and_reveal_tracks_outcome(
            guesses in proptest::collection::vec("[a-z ]{0,10}|pikachu|Pikachu ", 0..12)
        ) {
            let mut r = pikachu();
            for g in guesses {
                let before = r.clone();
                let (next, _) = r.submit_guess(&g);
                if before.revealed() {
                    prop_assert_eq!(&next, &before);
                } else {
                    prop_assert_eq!(next.attempts_used(), before.attempts_used() + 1);
                    let expected = next.entity().is_some_and(|e| e.matches(&g))
                        || next.attempts_used() == next.max_attempts();
                    prop_assert_eq!(next.revealed(), expected);
                }
                prop_assert!(next.attempts_used() <= next.max_attempts());
                r = next;
            }
        }
    }
}
