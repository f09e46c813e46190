//! Round and session engine for Silhouette, a "guess the hidden creature" game.
//!
//! A round hides a randomly chosen catalog entity behind a silhouette and
//! accepts a bounded number of name guesses. The session carries score and
//! level across rounds. Entity lookup and audio cues are delegated to
//! collaborators behind the [`EntityProvider`] and [`CueSink`] traits.

pub mod catalog;
pub mod config;
pub mod cue;
pub mod entity;
pub mod error;
pub mod game;
pub mod provider;
pub mod round;
pub mod session;

pub use catalog::Catalog;
pub use config::GameConfig;
pub use cue::{Cue, CueSink, NullCueSink};
pub use entity::Entity;
pub use error::{CueError, GameError, GameResult, ProviderError};
pub use game::{Game, GuessReport};
pub use provider::EntityProvider;
pub use round::{FeedbackEffect, Outcome, Round, RoundPhase};
pub use session::{ScoreDelta, Session};
