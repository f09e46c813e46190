//! Cue sinks for the terminal: the ASCII bell, or sound files played by an
//! external command.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

use sil_core::{Cue, CueError, CueSink};
use tracing::debug;

/// Player used when none is configured. Decodes MP3 without extra flags.
pub const DEFAULT_PLAYER: &str = "mpg123";

/// Rings the terminal bell: once for a new round, twice for a correct
/// guess, three times for a wrong one.
pub struct BellCueSink<W: Write> {
    out: W,
}

impl BellCueSink<io::Stdout> {
    /// Ring on stdout.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> BellCueSink<W> {
    /// Ring on an arbitrary writer.
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

fn bell_count(cue: Cue) -> usize {
    match cue {
        Cue::NewRound => 1,
        Cue::Correct => 2,
        Cue::Wrong => 3,
    }
}

impl<W: Write> CueSink for BellCueSink<W> {
    fn play(&mut self, cue: Cue) -> Result<(), CueError> {
        let bells = "\x07".repeat(bell_count(cue));
        self.out
            .write_all(bells.as_bytes())
            .and_then(|()| self.out.flush())
            .map_err(|e| CueError::Playback(e.to_string()))
    }
}

/// Plays `<dir>/<cue>.mp3` with an external MP3 player such as `mpg123`,
/// `afplay`, or `ffplay -nodisp -autoexit`, without waiting for it to finish.
pub struct SoundFileCueSink {
    program: String,
    args: Vec<String>,
    dir: PathBuf,
    children: Vec<Child>,
}

impl SoundFileCueSink {
    /// Create a sink that plays files from `dir` with `player`. The player
    /// string is split on whitespace into a program and leading arguments.
    pub fn new(player: &str, dir: impl Into<PathBuf>) -> Self {
        let mut words = player.split_whitespace().map(str::to_string);
        Self {
            program: words.next().unwrap_or_else(|| DEFAULT_PLAYER.to_string()),
            args: words.collect(),
            dir: dir.into(),
            children: Vec::new(),
        }
    }

    /// Path of the sound file for `cue`.
    pub fn file_for(&self, cue: Cue) -> PathBuf {
        self.dir.join(format!("{cue}.mp3"))
    }

    fn reap(&mut self) {
        let program = &self.program;
        self.children.retain_mut(|child| match child.try_wait() {
            Ok(None) => true,
            Ok(Some(status)) => {
                if !status.success() {
                    debug!(player = %program, %status, "sound player failed");
                }
                false
            }
            Err(e) => {
                debug!(player = %program, error = %e, "lost track of sound player");
                false
            }
        });
    }
}

impl CueSink for SoundFileCueSink {
    fn play(&mut self, cue: Cue) -> Result<(), CueError> {
        self.reap();
        let path = self.file_for(cue);
        if !path.is_file() {
            return Err(CueError::Playback(format!(
                "missing sound file {}",
                path.display()
            )));
        }
        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(&path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| CueError::Playback(format!("{}: {e}", self.program)))?;
        self.children.push(child);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bells_per_cue() {
        let mut sink = BellCueSink::new(Vec::new());
        sink.play(Cue::NewRound).unwrap();
        sink.play(Cue::Correct).unwrap();
        sink.play(Cue::Wrong).unwrap();
        assert_eq!(sink.out, b"\x07\x07\x07\x07\x07\x07");
    }

    #[test]
    fn sound_file_names() {
        let sink = SoundFileCueSink::new(DEFAULT_PLAYER, "/sounds");
        assert_eq!(sink.file_for(Cue::NewRound), PathBuf::from("/sounds/new-round.mp3"));
        assert_eq!(sink.file_for(Cue::Correct), PathBuf::from("/sounds/correct.mp3"));
        assert_eq!(sink.file_for(Cue::Wrong), PathBuf::from("/sounds/wrong.mp3"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = SoundFileCueSink::new(DEFAULT_PLAYER, dir.path());
        assert!(sink.play(Cue::Correct).is_err());
    }

    #[test]
    fn missing_player_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("wrong.mp3"), b"").unwrap();
        let mut sink = SoundFileCueSink::new("sil-no-such-player", dir.path());
        assert!(sink.play(Cue::Wrong).is_err());
    }

    #[test]
    fn player_string_splits_into_program_and_args() {
        let sink = SoundFileCueSink::new("ffplay -nodisp -autoexit", "/sounds");
        assert_eq!(sink.program, "ffplay");
        assert_eq!(sink.args, ["-nodisp", "-autoexit"]);

        let blank = SoundFileCueSink::new("  ", "/sounds");
        assert_eq!(blank.program, DEFAULT_PLAYER);
        assert!(blank.args.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn player_receives_args_then_sound_path() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("played.txt");
        // The "sound file" is a shell script that records its arguments.
        std::fs::write(
            dir.path().join("correct.mp3"),
            format!("echo \"$0 $*\" > '{}'\n", log.display()),
        )
        .unwrap();

        let mut sink = SoundFileCueSink::new("sh -e", dir.path());
        sink.play(Cue::Correct).unwrap();
        for child in &mut sink.children {
            assert!(child.wait().unwrap().success());
        }

        let played = std::fs::read_to_string(&log).unwrap();
        assert!(played.trim_end().ends_with("correct.mp3"));
    }
}
