//! Entity provider backed by the PokeAPI REST catalog.

use std::ops::RangeInclusive;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use tokio::runtime::Runtime;
use tracing::debug;

use sil_core::{Entity, EntityProvider, ProviderError};

/// Public PokeAPI endpoint.
pub const DEFAULT_API_URL: &str = "https://pokeapi.co/api/v2";

/// Upper bound for a single lookup.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches a random creature from `{base_url}/pokemon/{id}`.
///
/// The game loop is synchronous, so each fetch blocks on a private
/// current-thread runtime.
pub struct PokeApiProvider {
    base_url: String,
    ids: RangeInclusive<u32>,
    client: reqwest::Client,
    runtime: Runtime,
    rng: StdRng,
}

#[derive(Debug, Deserialize)]
struct PokemonResponse {
    name: String,
    sprites: Sprites,
}

#[derive(Debug, Deserialize)]
struct Sprites {
    front_default: Option<String>,
    #[serde(default)]
    other: Option<OtherSprites>,
}

#[derive(Debug, Deserialize)]
struct OtherSprites {
    #[serde(rename = "official-artwork")]
    official_artwork: Option<Artwork>,
}

#[derive(Debug, Deserialize)]
struct Artwork {
    front_default: Option<String>,
}

impl PokeApiProvider {
    /// Create a provider drawing ids from `ids`.
    pub fn new(base_url: &str, ids: RangeInclusive<u32>, seed: u64) -> Result<Self, String> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| format!("failed to start async runtime: {e}"))?;
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| format!("failed to build HTTP client: {e}"))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ids,
            client,
            runtime,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    async fn fetch(&self, id: u32) -> Result<Entity, ProviderError> {
        let url = format!("{}/pokemon/{id}", self.base_url);
        debug!(url = %url, "fetching entity");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        parse_entity(&bytes)
    }
}

impl EntityProvider for PokeApiProvider {
    fn fetch_random_entity(&mut self) -> Result<Entity, ProviderError> {
        let id = self.rng.random_range(self.ids.clone());
        self.runtime.block_on(self.fetch(id))
    }
}

/// Turn a `/pokemon/{id}` body into an entity, preferring official artwork
/// over the small default sprite.
fn parse_entity(body: &[u8]) -> Result<Entity, ProviderError> {
    let pokemon: PokemonResponse =
        serde_json::from_slice(body).map_err(|e| ProviderError::Decode(e.to_string()))?;

    let artwork = pokemon
        .sprites
        .other
        .and_then(|o| o.official_artwork)
        .and_then(|a| a.front_default);
    let image = artwork
        .or(pokemon.sprites.front_default)
        .unwrap_or_default();

    Entity::new(pokemon.name, image).map_err(|e| ProviderError::Decode(e.to_string()))
}
