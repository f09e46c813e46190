use std::io::{self, BufRead, Write};

use colored::Colorize;

use sil_core::{Outcome, RoundPhase};

use super::SilGame;

/// A line of player input, parsed.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Guess(&'a str),
    Next,
    Restart,
    Status,
    Help,
    Quit,
    Unknown(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    let Some(cmd) = line.strip_prefix(':') else {
        return Input::Guess(line);
    };
    match cmd.trim().to_lowercase().as_str() {
        "next" | "n" => Input::Next,
        "restart" | "r" => Input::Restart,
        "status" | "s" => Input::Status,
        "help" | "h" | "?" => Input::Help,
        "quit" | "q" => Input::Quit,
        _ => Input::Unknown(cmd),
    }
}

const HELP: &str = "\
Commands:
  <name>      Guess the hidden creature
  :next       Next creature (after the round is over)
  :restart    Reset score and level, start over
  :status     Show level, score, and attempts
  :help       Show this help
  :quit       Exit";

pub fn run(game: SilGame) -> Result<(), String> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with(game, stdin.lock(), stdout.lock())
}

/// Drive the prompt over arbitrary streams.
fn run_with<R: BufRead, W: Write>(mut game: SilGame, mut reader: R, mut out: W) -> Result<(), String> {
    let io_err = |e: io::Error| e.to_string();

    writeln!(out, "  {} Silhouette", "Starting".bold()).map_err(io_err)?;
    writeln!(out, "  Type a name to guess, ':help' for commands.\n").map_err(io_err)?;

    match game.start_round() {
        Ok(()) => show_new_round(&game, &mut out).map_err(io_err)?,
        Err(e) => show_fetch_error(&e.to_string(), &mut out).map_err(io_err)?,
    }

    let mut line = String::new();
    loop {
        write!(out, "> ").map_err(io_err)?;
        out.flush().map_err(io_err)?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break,
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match parse_input(input) {
            Input::Guess(guess) => do_guess(&mut game, guess, &mut out).map_err(io_err)?,
            Input::Next => do_next(&mut game, &mut out).map_err(io_err)?,
            Input::Restart => {
                let result = game.restart();
                writeln!(out, "{}", "Game restarted.".cyan()).map_err(io_err)?;
                match result {
                    Ok(()) => show_new_round(&game, &mut out).map_err(io_err)?,
                    Err(e) => show_fetch_error(&e.to_string(), &mut out).map_err(io_err)?,
                }
            }
            Input::Status => writeln!(out, "{}\n", status_line(&game)).map_err(io_err)?,
            Input::Help => writeln!(out, "{HELP}\n").map_err(io_err)?,
            Input::Quit => {
                writeln!(out, "Goodbye! {}", status_line(&game)).map_err(io_err)?;
                break;
            }
            Input::Unknown(cmd) => {
                writeln!(out, "{}\n", format!("unknown command: :{cmd}").yellow())
                    .map_err(io_err)?;
            }
        }
    }

    Ok(())
}

fn do_guess<W: Write>(game: &mut SilGame, guess: &str, out: &mut W) -> io::Result<()> {
    let report = game.submit_guess(guess);
    if !report.accepted {
        let hint = match game.round().phase() {
            RoundPhase::Initializing => "No creature loaded. Type ':next' to retry.",
            _ => "This round is over. Type ':next' for another creature.",
        };
        return writeln!(out, "{}\n", hint.yellow());
    }

    let message = game.round().outcome_message();
    match report.outcome {
        Some(Outcome::Correct) => writeln!(out, "{}", message.green().bold())?,
        Some(Outcome::Exhausted { .. }) => writeln!(out, "{}", message.red().bold())?,
        _ => writeln!(out, "{}", message.yellow())?,
    }
    writeln!(out, "{}", status_line(game))?;

    let terminal = report.outcome.as_ref().is_some_and(Outcome::is_terminal);
    if let Some(entity) = game.round().entity().filter(|_| terminal) {
        writeln!(out, "It's {}! {}", entity.name().to_uppercase().bold(), entity.image_url())?;
        writeln!(out, "Type ':next' for another creature, ':restart' to start over.")?;
    }
    writeln!(out)
}

fn do_next<W: Write>(game: &mut SilGame, out: &mut W) -> io::Result<()> {
    let result = if game.round().phase() == RoundPhase::Initializing {
        game.start_round().map(|()| true)
    } else {
        game.advance()
    };
    match result {
        Ok(true) => show_new_round(game, out),
        Ok(false) => writeln!(
            out,
            "{}\n",
            "Round still in play. Guess until it is revealed.".yellow()
        ),
        Err(e) => show_fetch_error(&e.to_string(), out),
    }
}

fn show_new_round<W: Write>(game: &SilGame, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", "A new silhouette appears: ???".cyan())?;
    writeln!(out, "{}\n", status_line(game))
}

fn show_fetch_error<W: Write>(error: &str, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", error.red())?;
    writeln!(out, "Type ':next' to try again.\n")
}

fn status_line(game: &SilGame) -> String {
    let round = game.round();
    format!(
        "Level {} | Score {} | Attempts {}/{}",
        game.session().level(),
        game.session().score(),
        round.attempts_used(),
        round.max_attempts()
    )
}
