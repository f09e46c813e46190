//! Rendering for the TUI.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use sil_core::{FeedbackEffect, Outcome, RoundPhase};

use super::app::App;

/// Rows of the shadow drawn while the creature is hidden.
const SILHOUETTE: [&str; 7] = [
    "      ▄▄▄      ",
    "    ▄█████▄    ",
    "   ███▀█▀███   ",
    "   █████████   ",
    "    ▀█████▀    ",
    "   ▄██▀ ▀██▄   ",
    "  ▀▀▀     ▀▀▀  ",
];

/// Draw the whole screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(5),    // Silhouette
            Constraint::Length(3), // Message
            Constraint::Length(3), // Input
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);
    draw_silhouette(frame, app, chunks[1]);
    draw_message(frame, app, chunks[2]);
    draw_input(frame, app, chunks[3]);

    let status = Paragraph::new(status_hint(app))
        .style(Style::default().fg(Color::Black).bg(Color::White));
    frame.render_widget(status, chunks[4]);

    if app.show_help {
        draw_help_popup(frame);
    }
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let session = app.game.session();
    let round = app.game.round();
    let line = Line::from(vec![
        Span::styled("Silhouette", Style::default().fg(Color::Yellow).bold()),
        Span::styled("  |  ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("Level {}", session.level())),
        Span::styled("  |  ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("Score {}", session.score())),
        Span::styled("  |  ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!(
            "Attempts {}/{} ({} left)",
            round.attempts_used(),
            round.max_attempts(),
            round.attempts_remaining()
        )),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn effect_color(effect: FeedbackEffect) -> Color {
    match effect {
        FeedbackEffect::None => Color::Blue,
        FeedbackEffect::Success => Color::Green,
        FeedbackEffect::Failure => Color::Red,
    }
}

fn draw_silhouette(frame: &mut Frame, app: &App, area: Rect) {
    let round = app.game.round();
    let block = Block::default()
        .title(" Who's that? ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(effect_color(round.feedback_effect())));

    let lines: Vec<Line> = match (round.phase(), round.entity()) {
        (RoundPhase::Revealed, Some(entity)) => vec![
            Line::from(""),
            Line::from(Span::styled(
                entity.name().to_uppercase(),
                Style::default().fg(Color::Yellow).bold(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                entity.image_url().to_string(),
                Style::default().fg(Color::Cyan).underlined(),
            )),
        ],
        (_, Some(_)) => SILHOUETTE
            .iter()
            .map(|row| Line::from(Span::styled(*row, Style::default().fg(Color::DarkGray))))
            .chain([Line::from(""), Line::from("???").bold()])
            .collect(),
        (_, None) => vec![Line::from(Span::styled(
            "No creature loaded.",
            Style::default().fg(Color::DarkGray).italic(),
        ))],
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_message(frame: &mut Frame, app: &App, area: Rect) {
    let round = app.game.round();
    let (text, color) = match (&app.error, round.outcome()) {
        (Some(error), _) => (error.clone(), Color::Red),
        (None, Some(Outcome::Correct)) => (round.outcome_message(), Color::Green),
        (None, Some(Outcome::Exhausted { .. })) => (round.outcome_message(), Color::Red),
        (None, Some(Outcome::Incorrect { .. })) => (round.outcome_message(), Color::Yellow),
        (None, None) => (String::new(), Color::White),
    };
    let paragraph = Paragraph::new(Span::styled(text, Style::default().fg(color).bold()))
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn draw_input(frame: &mut Frame, app: &App, area: Rect) {
    let enabled = app.input_enabled();
    let border = if enabled { Color::Green } else { Color::DarkGray };
    let text = if enabled {
        format!("> {}", app.input)
    } else {
        "> (round over)".to_string()
    };
    let input = Paragraph::new(text)
        .style(Style::default().fg(if enabled { Color::White } else { Color::DarkGray }))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );
    frame.render_widget(input, area);

    if enabled {
        // Offset by the left border and the "> " prefix.
        let width = u16::try_from(app.input[..app.cursor].chars().count()).unwrap_or(u16::MAX);
        let cursor_x = area.x.saturating_add(3).saturating_add(width);
        if cursor_x < area.x + area.width.saturating_sub(1) {
            frame.set_cursor_position(Position::new(cursor_x, area.y + 1));
        }
    }
}

fn status_hint(app: &App) -> &'static str {
    match app.game.round().phase() {
        RoundPhase::AwaitingGuess => "Enter:guess  Esc:clear  Ctrl+R:restart  ?:help  Ctrl+C:quit",
        RoundPhase::Revealed => "Enter/Ctrl+N:next  Ctrl+R:restart  q:quit",
        RoundPhase::Initializing => "Enter/Ctrl+N:retry  Ctrl+R:restart  q:quit",
    }
}

/// Create a centered rectangle as a percentage of the given area.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn draw_help_popup(frame: &mut Frame) {
    let area = centered_rect(60, 60, frame.area());

    let help_text = vec![
        Line::from("Keyboard Shortcuts").style(Style::default().bold()),
        Line::from(""),
        Line::from("  Enter       Guess / next creature"),
        Line::from("  Esc         Clear input"),
        Line::from("  Ctrl+N      Next creature (round over)"),
        Line::from("  Ctrl+R      Restart game"),
        Line::from("  ?           Toggle this help"),
        Line::from("  Ctrl+C      Quit"),
    ];

    let popup = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}
