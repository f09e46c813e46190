//! Tracing subscriber setup.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the `-v` verbosity.
pub const LOG_ENV: &str = "SIL_LOG";

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Human-readable lines on stderr.
    Stderr,
    /// Append to a file, without ANSI colors.
    File(PathBuf),
    /// No subscriber is installed.
    Off,
}

/// Map `-v` occurrences to a filter directive.
pub const fn verbosity_to_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. `SIL_LOG` wins over `verbosity`.
///
/// Safe to call repeatedly; later calls are ignored.
pub fn init_logging(verbosity: u8, target: LogTarget) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(verbosity_to_directive(verbosity)));

    match target {
        LogTarget::Stderr => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(verbosity >= 2)
                .with_writer(std::io::stderr)
                .try_init();
        }
        LogTarget::File(path) => match File::options().create(true).append(true).open(&path) {
            Ok(file) => {
                let _ = tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .try_init();
            }
            Err(e) => eprintln!("warning: cannot open log file {}: {e}", path.display()),
        },
        LogTarget::Off => {}
    }
}
