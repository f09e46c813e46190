//! TUI application state: the game plus input buffer and effect timer.

use std::time::{Duration, Instant};

use sil_core::{FeedbackEffect, RoundPhase};

use crate::commands::SilGame;

/// Main application state for the TUI.
pub struct App {
    /// The running game.
    pub game: SilGame,
    /// Current guess text.
    pub input: String,
    /// Cursor position within `input` (byte offset).
    pub cursor: usize,
    /// Last provider error, shown until the next accepted guess or round start.
    pub error: Option<String>,
    /// When the live feedback effect was raised.
    pub effect_since: Option<Instant>,
    /// Whether the help popup is visible.
    pub show_help: bool,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl App {
    /// Wrap a game and try to start its first round.
    pub fn new(game: SilGame) -> Self {
        let mut app = Self {
            game,
            input: String::new(),
            cursor: 0,
            error: None,
            effect_since: None,
            show_help: false,
            should_quit: false,
        };
        app.begin_round();
        app
    }

    /// Whether the guess input is live.
    pub fn input_enabled(&self) -> bool {
        self.game.round().accepts_guesses()
    }

    /// Submit the current input as a guess. An empty line counts as a miss.
    pub fn submit(&mut self) {
        if !self.input_enabled() {
            return;
        }
        let guess = self.input.trim().to_string();
        let report = self.game.submit_guess(&guess);
        if report.accepted {
            self.error = None;
            self.clear_input();
            if self.game.round().feedback_effect() != FeedbackEffect::None {
                self.effect_since = Some(Instant::now());
            }
        }
    }

    /// Move to the next creature. Retries the fetch if no round is loaded.
    pub fn next_round(&mut self) {
        if self.game.round().phase() == RoundPhase::Initializing {
            self.begin_round();
            return;
        }
        match self.game.advance() {
            Ok(true) => self.on_new_round(),
            Ok(false) => {}
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    /// Reset score and level and start over.
    pub fn restart(&mut self) {
        match self.game.restart() {
            Ok(()) => self.on_new_round(),
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    /// Expire the feedback effect once its display time has passed.
    pub fn tick(&mut self, now: Instant) {
        let duration = self.game.config().feedback_duration;
        if let Some(since) = self.effect_since
            && now.saturating_duration_since(since) >= duration
        {
            self.game.clear_feedback_effect();
            self.effect_since = None;
        }
    }

    /// Time until the effect timer needs attention.
    pub fn next_tick_in(&self, now: Instant) -> Option<Duration> {
        let duration = self.game.config().feedback_duration;
        self.effect_since
            .map(|since| duration.saturating_sub(now.saturating_duration_since(since)))
    }

    /// Insert a character at the cursor.
    pub fn push_char(&mut self, c: char) {
        if !self.input_enabled() {
            return;
        }
        self.input.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = self.input[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.input.remove(prev);
            self.cursor = prev;
        }
    }

    /// Move cursor left.
    pub fn cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.input[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    /// Move cursor right.
    pub fn cursor_right(&mut self) {
        if let Some(c) = self.input[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    /// Clear the input line.
    pub fn clear_input(&mut self) {
        self.input.clear();
        self.cursor = 0;
    }

    fn begin_round(&mut self) {
        match self.game.start_round() {
            Ok(()) => self.on_new_round(),
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    fn on_new_round(&mut self) {
        self.error = None;
        self.effect_since = None;
        self.clear_input();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sil_core::{
        Catalog, CueSink, Entity, EntityProvider, Game, GameConfig, NullCueSink, ProviderError,
    };

    /// Serves the listed names in order, then reports the network as down.
    struct Script(Vec<&'static str>);

    impl EntityProvider for Script {
        fn fetch_random_entity(&mut self) -> Result<Entity, ProviderError> {
            if self.0.is_empty() {
                return Err(ProviderError::Network("offline".into()));
            }
            let name = self.0.remove(0);
            Entity::new(name, format!("{name}.png"))
                .map_err(|e| ProviderError::Decode(e.to_string()))
        }
    }

    fn app_with(names: &[&str]) -> App {
        let entities = names
            .iter()
            .map(|n| Entity::new(*n, format!("{n}.png")).unwrap())
            .collect();
        let provider: Box<dyn EntityProvider> = Box::new(Catalog::new(entities, 1).unwrap());
        let cues: Box<dyn CueSink> = Box::new(NullCueSink);
        App::new(Game::new(GameConfig::default(), provider, cues))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.push_char(c);
        }
    }

    #[test]
    fn starts_with_live_round() {
        let app = app_with(&["pikachu"]);
        assert!(app.input_enabled());
        assert!(app.error.is_none());
    }

    #[test]
    fn correct_guess_disables_input_and_arms_effect() {
        let mut app = app_with(&["pikachu"]);
        type_text(&mut app, "pikachu");
        app.submit();
        assert!(!app.input_enabled());
        assert!(app.input.is_empty());
        assert!(app.effect_since.is_some());
        assert_eq!(app.game.session().score(), 5);

        type_text(&mut app, "x");
        assert!(app.input.is_empty());
    }

    #[test]
    fn effect_expires_after_duration() {
        let mut app = app_with(&["pikachu"]);
        type_text(&mut app, "pikachu");
        app.submit();
        let since = app.effect_since.unwrap();

        app.tick(since + Duration::from_millis(100));
        assert_eq!(app.game.round().feedback_effect(), FeedbackEffect::Success);
        assert_eq!(
            app.next_tick_in(since + Duration::from_millis(100)),
            Some(Duration::from_millis(700))
        );

        app.tick(since + Duration::from_millis(800));
        assert_eq!(app.game.round().feedback_effect(), FeedbackEffect::None);
        assert!(app.effect_since.is_none());
        assert!(app.game.round().revealed());
    }

    #[test]
    fn wrong_guess_has_no_effect() {
        let mut app = app_with(&["pikachu"]);
        type_text(&mut app, "raichu");
        app.submit();
        assert!(app.effect_since.is_none());
        assert_eq!(app.game.round().attempts_used(), 1);
    }

    #[test]
    fn next_round_only_after_reveal() {
        let mut app = app_with(&["pikachu"]);
        type_text(&mut app, "raichu");
        app.submit();
        app.next_round();
        assert_eq!(app.game.round().attempts_used(), 1);

        type_text(&mut app, "pikachu");
        app.submit();
        app.next_round();
        assert_eq!(app.game.round().attempts_used(), 0);
        assert!(app.input_enabled());
        assert!(app.effect_since.is_none());
    }

    #[test]
    fn restart_resets_session() {
        let mut app = app_with(&["mew"]);
        type_text(&mut app, "mew");
        app.submit();
        app.restart();
        assert_eq!(app.game.session().score(), 0);
        assert_eq!(app.game.session().level(), 1);
        assert!(app.input_enabled());
    }

    #[test]
    fn accepted_guess_clears_stale_fetch_error() {
        let provider: Box<dyn EntityProvider> = Box::new(Script(vec!["pikachu"]));
        let cues: Box<dyn CueSink> = Box::new(NullCueSink);
        let mut app = App::new(Game::new(GameConfig::default(), provider, cues));

        app.restart();
        assert!(app.error.is_some());
        assert!(app.input_enabled());

        type_text(&mut app, "raichu");
        app.submit();
        assert!(app.error.is_none());
        assert_eq!(app.game.round().attempts_used(), 1);
        assert_eq!(app.game.round().outcome_message(), "Incorrect! Try again (1/5)");
    }

    #[test]
    fn empty_submit_counts_as_miss() {
        let mut app = app_with(&["pikachu"]);
        type_text(&mut app, "pikachu");
        app.submit();
        app.next_round();
        let score = app.game.session().score();
        assert_eq!(score, 5);

        type_text(&mut app, "   ");
        app.submit();
        assert_eq!(app.game.round().attempts_used(), 1);
        assert_eq!(app.game.session().score(), score - 1);
        assert!(app.input.is_empty());
    }

    #[test]
    fn submit_ignored_without_round() {
        let provider: Box<dyn EntityProvider> = Box::new(Script(vec![]));
        let cues: Box<dyn CueSink> = Box::new(NullCueSink);
        let mut app = App::new(Game::new(GameConfig::default(), provider, cues));
        assert!(app.error.is_some());

        app.submit();
        assert!(app.error.is_some());
        assert_eq!(app.game.session().score(), 0);
    }

    #[test]
    fn editing_handles_multibyte() {
        let mut app = app_with(&["flabébé"]);
        type_text(&mut app, "flabé");
        app.cursor_left();
        app.backspace();
        assert_eq!(app.input, "flaé");
        app.cursor_right();
        assert_eq!(app.cursor, app.input.len());
        app.clear_input();
        assert_eq!(app.cursor, 0);
    }
}
