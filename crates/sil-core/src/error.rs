//! Error types for the game engine and its collaborators.

use thiserror::Error;

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;

/// Errors surfaced by the game engine.
///
/// None of these are fatal: a failed operation leaves the previous round and
/// session untouched.
#[derive(Debug, Error)]
pub enum GameError {
    /// The entity provider could not supply an entity for a new round.
    #[error("entity provider unavailable: {0}")]
    ProviderUnavailable(#[from] ProviderError),

    /// An entity failed validation (for example, an empty name).
    #[error("invalid entity: {0}")]
    InvalidEntity(String),

    /// A catalog was constructed without any entities.
    #[error("catalog contains no entities")]
    EmptyCatalog,

    /// A catalog file could not be read or parsed.
    #[error("failed to load catalog: {0}")]
    CatalogLoad(String),
}

/// Errors raised by an [`EntityProvider`](crate::EntityProvider).
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The transport failed before a response was received.
    #[error("network error: {0}")]
    Network(String),

    /// The remote catalog answered with a non-success status.
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// The response could not be turned into an entity.
    #[error("malformed catalog response: {0}")]
    Decode(String),

    /// The provider has nothing to offer.
    #[error("no entities available")]
    Empty,
}

/// Errors raised by a [`CueSink`](crate::CueSink) while playing a cue.
#[derive(Debug, Error)]
pub enum CueError {
    /// The cue could not be played.
    #[error("cue playback failed: {0}")]
    Playback(String),
}
