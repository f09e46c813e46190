//! The hidden catalog entity a round is built around.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};

/// A catalog entry: the name to guess and an image reference.
///
/// Immutable for the lifetime of a round. Deserialization goes through the
/// same validation as [`Entity::new`], so a catalog file cannot smuggle in an
/// empty name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EntityRecord")]
pub struct Entity {
    name: String,
    image_url: String,
}

/// Unvalidated wire form of an [`Entity`].
#[derive(Deserialize)]
struct EntityRecord {
    name: String,
    #[serde(default, alias = "image")]
    image_url: String,
}

impl TryFrom<EntityRecord> for Entity {
    type Error = GameError;

    fn try_from(record: EntityRecord) -> GameResult<Self> {
        Entity::new(record.name, record.image_url)
    }
}

impl Entity {
    /// Create an entity. The name must contain at least one non-whitespace
    /// character.
    pub fn new(name: impl Into<String>, image_url: impl Into<String>) -> GameResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(GameError::InvalidEntity(
                "entity name must not be empty".to_string(),
            ));
        }
        Ok(Self {
            name,
            image_url: image_url.into(),
        })
    }

    /// The catalog name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The image reference.
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    /// Whether `guess` names this entity, ignoring surrounding whitespace
    /// and letter case.
    pub fn matches(&self, guess: &str) -> bool {
        normalize(guess) == normalize(&self.name)
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}
