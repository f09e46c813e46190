//! Terminal frontends for Silhouette, the "guess the hidden creature" game.

mod commands;
mod cue;
mod logging;
mod provider;
mod tui;

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};

use commands::GameArgs;

#[derive(Parser)]
#[command(
    name = "sil",
    about = "Silhouette: guess the hidden creature from its shadow",
    version,
    propagate_version = true
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play in a line-based prompt
    Play {
        #[command(flatten)]
        game: GameArgs,
    },

    /// Play in a full-screen terminal UI
    Tui {
        #[command(flatten)]
        game: GameArgs,

        /// Write logs to this file (the screen itself is never logged to)
        #[arg(long)]
        log_file: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play { game } => {
            logging::init_logging(cli.verbose, logging::LogTarget::Stderr);
            commands::build_game(&game).and_then(commands::play::run)
        }
        Commands::Tui { game, log_file } => {
            let target = match log_file {
                Some(path) => logging::LogTarget::File(path),
                None => logging::LogTarget::Off,
            };
            logging::init_logging(cli.verbose, target);
            commands::build_game(&game).and_then(tui::run)
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
