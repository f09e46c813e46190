//! Audio cues announcing round transitions.
//!
//! Cues are fire-and-forget: a sink that fails to play one never affects
//! game state.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::CueError;

/// A discrete sound signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Cue {
    /// A new round has started.
    NewRound,
    /// The entity was guessed.
    Correct,
    /// A guess was wrong.
    Wrong,
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cue::NewRound => write!(f, "new-round"),
            Cue::Correct => write!(f, "correct"),
            Cue::Wrong => write!(f, "wrong"),
        }
    }
}

/// Something that can play cues.
pub trait CueSink {
    /// Play a cue. Errors are reported but discarded by the game.
    fn play(&mut self, cue: Cue) -> Result<(), CueError>;
}

impl<T: CueSink + ?Sized> CueSink for Box<T> {
    fn play(&mut self, cue: Cue) -> Result<(), CueError> {
        (**self).play(cue)
    }
}

/// A sink that plays nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCueSink;

impl CueSink for NullCueSink {
    fn play(&mut self, _cue: Cue) -> Result<(), CueError> {
        Ok(())
    }
}

/// Play `cue`, swallowing any playback failure.
pub(crate) fn emit<C: CueSink + ?Sized>(sink: &mut C, cue: Cue) {
    if let Err(e) = sink.play(cue) {
        debug!(%cue, error = %e, "ignoring cue playback failure");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl CueSink for Broken {
        fn play(&mut self, _cue: Cue) -> Result<(), CueError> {
            Err(CueError::Playback("no audio device".into()))
        }
    }

    #[test]
    fn emit_swallows_errors() {
        emit(&mut Broken, Cue::Wrong);
        emit(&mut NullCueSink, Cue::Correct);
    }

    #[test]
    fn boxed_sink_delegates() {
        let mut sink: Box<dyn CueSink> = Box::new(Broken);
        assert!(sink.play(Cue::NewRound).is_err());
    }

    #[test]
    fn display_names() {
        assert_eq!(Cue::NewRound.to_string(), "new-round");
        assert_eq!(Cue::Correct.to_string(), "correct");
        assert_eq!(Cue::Wrong.to_string(), "wrong");
    }
}
