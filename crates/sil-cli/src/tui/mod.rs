//! Full-screen terminal frontend: setup, teardown, and the event loop.

mod app;
mod views;

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;

use crate::commands::SilGame;

use app::App;

/// Idle poll interval when no effect timer is pending.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Launch the TUI.
pub fn run(game: SilGame) -> Result<(), String> {
    enable_raw_mode().map_err(|e| format!("terminal error: {e}"))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| format!("terminal error: {e}"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| format!("terminal error: {e}"))?;

    let mut app = App::new(game);

    let result = run_loop(&mut terminal, &mut app);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

/// Main event loop. Polls so the feedback effect can expire between keys.
fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), String> {
    loop {
        app.tick(Instant::now());
        terminal
            .draw(|frame| views::draw(frame, app))
            .map_err(|e| format!("draw error: {e}"))?;

        if app.should_quit {
            return Ok(());
        }

        let timeout = app.next_tick_in(Instant::now()).unwrap_or(IDLE_POLL);
        if !event::poll(timeout).map_err(|e| format!("event error: {e}"))? {
            continue;
        }
        if let Event::Key(key) = event::read().map_err(|e| format!("event error: {e}"))?
            && key.kind == KeyEventKind::Press
        {
            handle_key(app, key);
        }
    }
}

/// Route a key press.
fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => app.should_quit = true,
            KeyCode::Char('n') => app.next_round(),
            KeyCode::Char('r') => app.restart(),
            _ => {}
        }
        return;
    }

    if app.show_help {
        app.show_help = false;
        return;
    }

    match key.code {
        KeyCode::Enter if app.input_enabled() => app.submit(),
        KeyCode::Enter => app.next_round(),
        KeyCode::Esc => app.clear_input(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Left => app.cursor_left(),
        KeyCode::Right => app.cursor_right(),
        KeyCode::Char('?') if app.input.is_empty() => app.show_help = true,
        KeyCode::Char('q') if !app.input_enabled() => app.should_quit = true,
        KeyCode::Char(c) => app.push_char(c),
        _ => {}
    }
}
