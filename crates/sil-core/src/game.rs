//! Game orchestration: wires the round engine and session tracker to the
//! entity provider and the cue sink.
//!
//! All state changes are driven by four player actions (guess, next,
//! restart, and the feedback timer expiring) plus entity fetches. Failures
//! never leave a half-applied transition behind.

use tracing::{debug, info, warn};

use crate::config::GameConfig;
use crate::cue::{Cue, CueSink, emit};
use crate::error::GameResult;
use crate::provider::EntityProvider;
use crate::round::{Outcome, Round};
use crate::session::{ScoreDelta, Session};

/// What happened to a submitted guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessReport {
    /// Whether the guess was evaluated. False when the round was revealed or
    /// still initializing.
    pub accepted: bool,
    /// Delta applied to the session.
    pub delta: ScoreDelta,
    /// The resulting outcome, if the guess was evaluated.
    pub outcome: Option<Outcome>,
}

impl GuessReport {
    fn ignored() -> Self {
        Self {
            accepted: false,
            delta: ScoreDelta::NONE,
            outcome: None,
        }
    }
}

/// A running game: one live round plus the session it feeds.
pub struct Game<P, C> {
    config: GameConfig,
    provider: P,
    cues: C,
    session: Session,
    round: Round,
    rounds_started: u32,
}

impl<P: EntityProvider, C: CueSink> Game<P, C> {
    /// Create a game. No round is loaded until [`Game::start_round`].
    pub fn new(config: GameConfig, provider: P, cues: C) -> Self {
        let round = Round::initializing(config.max_attempts);
        Self {
            config,
            provider,
            cues,
            session: Session::new(),
            round,
            rounds_started: 0,
        }
    }

    /// The game configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The live round.
    pub fn round(&self) -> &Round {
        &self.round
    }

    /// The session score and level.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Rounds successfully started since the game (or last restart) began.
    pub fn rounds_started(&self) -> u32 {
        self.rounds_started
    }

    /// Fetch an entity and begin a fresh round.
    ///
    /// On provider failure the current round is left untouched and no
    /// penalty is applied; the caller may simply try again.
    pub fn start_round(&mut self) -> GameResult<()> {
        let entity = match self.provider.fetch_random_entity() {
            Ok(entity) => entity,
            Err(e) => {
                warn!(error = %e, "could not fetch an entity, keeping current round");
                return Err(e.into());
            }
        };

        self.rounds_started += 1;
        info!(round = self.rounds_started, "starting round");
        debug!(entity = entity.name(), "hidden entity chosen");
        self.round = Round::start(entity, self.config.max_attempts);
        emit(&mut self.cues, Cue::NewRound);
        Ok(())
    }

    /// Evaluate a guess against the live round and feed the delta to the
    /// session.
    pub fn submit_guess(&mut self, guess: &str) -> GuessReport {
        if !self.round.accepts_guesses() {
            debug!(phase = ?self.round.phase(), "guess ignored");
            return GuessReport::ignored();
        }

        let (round, delta) = std::mem::take(&mut self.round).submit_guess(guess);
        self.round = round;
        self.session = self.session.apply_delta(delta);

        let outcome = self.round.outcome().cloned();
        if let Some(outcome) = &outcome {
            info!(
                attempt = self.round.attempts_used(),
                outcome = %outcome,
                score = self.session.score(),
                level = self.session.level(),
                "guess evaluated"
            );
            emit(&mut self.cues, outcome.cue());
        }

        GuessReport {
            accepted: true,
            delta,
            outcome,
        }
    }

    /// Move on to the next round. Only allowed once the live round is
    /// revealed; returns whether a new round was started.
    pub fn advance(&mut self) -> GameResult<bool> {
        if !self.round.advance() {
            debug!("advance ignored, round still in play");
            return Ok(false);
        }
        self.start_round()?;
        Ok(true)
    }

    /// Reset score and level, then start a fresh round.
    ///
    /// The session is reset even if the fetch fails.
    pub fn restart(&mut self) -> GameResult<()> {
        info!(
            score = self.session.score(),
            level = self.session.level(),
            "restarting game"
        );
        self.session = self.session.restart();
        self.rounds_started = 0;
        self.start_round()
    }

    /// Expire the live feedback effect.
    pub fn clear_feedback_effect(&mut self) {
        self.round = std::mem::take(&mut self.round).with_feedback_cleared();
    }
}
