pub mod play;

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use rand::Rng;
use tracing::info;

use sil_core::{Catalog, CueSink, EntityProvider, Game, GameConfig, NullCueSink};

use crate::cue::{BellCueSink, DEFAULT_PLAYER, SoundFileCueSink};
use crate::provider::{DEFAULT_API_URL, PokeApiProvider};

/// The game type both frontends drive.
pub type SilGame = Game<Box<dyn EntityProvider>, Box<dyn CueSink>>;

/// Options shared by every frontend.
#[derive(Args, Debug, Clone)]
pub struct GameArgs {
    /// RNG seed for creature selection (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Guesses allowed per round
    #[arg(long, default_value = "5")]
    pub attempts: u32,

    /// Lowest catalog id to draw from
    #[arg(long, default_value = "1")]
    pub min_id: u32,

    /// Highest catalog id to draw from
    #[arg(long, default_value = "151")]
    pub max_id: u32,

    /// Load creatures from a JSON file instead of the network
    #[arg(long, conflicts_with = "offline")]
    pub catalog: Option<PathBuf>,

    /// Use the built-in catalog instead of the network
    #[arg(long)]
    pub offline: bool,

    /// PokeAPI base URL
    #[arg(long, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Play sound files (new-round.mp3, correct.mp3, wrong.mp3) from this directory
    #[arg(long)]
    pub sound_dir: Option<PathBuf>,

    /// MP3 player command, optionally with flags (e.g. "ffplay -nodisp -autoexit")
    #[arg(long, default_value = DEFAULT_PLAYER)]
    pub player: String,

    /// How long the correct/wrong highlight stays visible, in milliseconds
    #[arg(long, default_value = "800")]
    pub feedback_ms: u64,

    /// Disable all audio cues
    #[arg(long)]
    pub mute: bool,
}

/// Build a game from CLI options. No round is started yet.
pub fn build_game(args: &GameArgs) -> Result<SilGame, String> {
    if args.min_id > args.max_id {
        return Err(format!(
            "invalid id range: --min-id {} is greater than --max-id {}",
            args.min_id, args.max_id
        ));
    }
    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    let config = GameConfig::default()
        .with_seed(seed)
        .with_max_attempts(args.attempts)
        .with_id_range(args.min_id..=args.max_id)
        .with_feedback_duration(Duration::from_millis(args.feedback_ms));

    let provider: Box<dyn EntityProvider> = if let Some(path) = &args.catalog {
        Box::new(Catalog::from_path(path, seed).map_err(|e| e.to_string())?)
    } else if args.offline {
        Box::new(Catalog::builtin(config.id_range.clone(), seed).map_err(|e| e.to_string())?)
    } else {
        Box::new(PokeApiProvider::new(
            &args.api_url,
            config.id_range.clone(),
            seed,
        )?)
    };

    let cues: Box<dyn CueSink> = match (&args.sound_dir, args.mute) {
        (_, true) => Box::new(NullCueSink),
        (Some(dir), false) => Box::new(SoundFileCueSink::new(&args.player, dir)),
        (None, false) => Box::new(BellCueSink::stdout()),
    };

    info!(seed, attempts = config.max_attempts, "building game");
    Ok(Game::new(config, provider, cues))
}
