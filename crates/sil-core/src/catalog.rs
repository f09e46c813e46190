//! An offline entity provider backed by an in-memory list.

use std::ops::RangeInclusive;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::entity::Entity;
use crate::error::{GameError, GameResult, ProviderError};
use crate::provider::EntityProvider;

/// Artwork location for built-in entries; `{id}` is the catalog id.
const ARTWORK_URL: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork";

/// Built-in names, indexed by catalog id minus one.
const KANTO: [&str; 151] = [
    "bulbasaur", "ivysaur", "venusaur", "charmander", "charmeleon", "charizard",
    "squirtle", "wartortle", "blastoise", "caterpie", "metapod", "butterfree",
    "weedle", "kakuna", "beedrill", "pidgey", "pidgeotto", "pidgeot", "rattata",
    "raticate", "spearow", "fearow", "ekans", "arbok", "pikachu", "raichu",
    "sandshrew", "sandslash", "nidoran-f", "nidorina", "nidoqueen", "nidoran-m",
    "nidorino", "nidoking", "clefairy", "clefable", "vulpix", "ninetales",
    "jigglypuff", "wigglytuff", "zubat", "golbat", "oddish", "gloom", "vileplume",
    "paras", "parasect", "venonat", "venomoth", "diglett", "dugtrio", "meowth",
    "persian", "psyduck", "golduck", "mankey", "primeape", "growlithe", "arcanine",
    "poliwag", "poliwhirl", "poliwrath", "abra", "kadabra", "alakazam", "machop",
    "machoke", "machamp", "bellsprout", "weepinbell", "victreebel", "tentacool",
    "tentacruel", "geodude", "graveler", "golem", "ponyta", "rapidash", "slowpoke",
    "slowbro", "magnemite", "magneton", "farfetchd", "doduo", "dodrio", "seel",
    "dewgong", "grimer", "muk", "shellder", "cloyster", "gastly", "haunter",
    "gengar", "onix", "drowzee", "hypno", "krabby", "kingler", "voltorb",
    "electrode", "exeggcute", "exeggutor", "cubone", "marowak", "hitmonlee",
    "hitmonchan", "lickitung", "koffing", "weezing", "rhyhorn", "rhydon",
    "chansey", "tangela", "kangaskhan", "horsea", "seadra", "goldeen", "seaking",
    "staryu", "starmie", "mr-mime", "scyther", "jynx", "electabuzz", "magmar",
    "pinsir", "tauros", "magikarp", "gyarados", "lapras", "ditto", "eevee",
    "vaporeon", "jolteon", "flareon", "porygon", "omanyte", "omastar", "kabuto",
    "kabutops", "aerodactyl", "snorlax", "articuno", "zapdos", "moltres",
    "dratini", "dragonair", "dragonite", "mewtwo", "mew",
];

/// A fixed list of entities sampled uniformly with a seeded RNG.
pub struct Catalog {
    entities: Vec<Entity>,
    rng: StdRng,
}

impl Catalog {
    /// Create a catalog from a list of entities.
    pub fn new(entities: Vec<Entity>, seed: u64) -> GameResult<Self> {
        if entities.is_empty() {
            return Err(GameError::EmptyCatalog);
        }
        Ok(Self {
            entities,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// The built-in catalog restricted to ids in `ids`.
    pub fn builtin(ids: RangeInclusive<u32>, seed: u64) -> GameResult<Self> {
        let entities = KANTO
            .iter()
            .zip(1u32..)
            .filter(|(_, id)| ids.contains(id))
            .map(|(name, id)| Entity::new(*name, format!("{ARTWORK_URL}/{id}.png")))
            .collect::<GameResult<Vec<_>>>()?;
        Self::new(entities, seed)
    }

    /// Parse a JSON array of `{"name": ..., "image": ...}` objects.
    pub fn from_json(json: &str, seed: u64) -> GameResult<Self> {
        let entities: Vec<Entity> =
            serde_json::from_str(json).map_err(|e| GameError::CatalogLoad(e.to_string()))?;
        Self::new(entities, seed)
    }

    /// Load a JSON catalog file.
    pub fn from_path(path: &Path, seed: u64) -> GameResult<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| GameError::CatalogLoad(format!("{}: {e}", path.display())))?;
        let catalog = Self::from_json(&json, seed)?;
        debug!(path = %path.display(), entries = catalog.len(), "loaded catalog");
        Ok(catalog)
    }

    /// All entries.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the catalog is empty. Always false for a constructed catalog.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl EntityProvider for Catalog {
    fn fetch_random_entity(&mut self) -> Result<Entity, ProviderError> {
        if self.entities.is_empty() {
            return Err(ProviderError::Empty);
        }
        let idx = self.rng.random_range(0..self.entities.len());
        Ok(self.entities[idx].clone())
    }
}
