//! Pure view/render functions for the board screens.
//!
//! Functions here take `&AppState` by immutable reference, draw to a
//! ratatui frame, and never mutate state or return effects. Mid-flip
//! cells draw the transient glyph reported by their host: the outgoing
//! glyph reversed while the flap folds away, the incoming glyph bold
//! while it falls into place.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tokio::time::Instant;

use crate::host::{FlipFrame, FlipPhase};
use crate::state::{AppState, COLUMNS, FieldBoard, Screen};

/// Height of the title/clock header.
const HEADER_HEIGHT: u16 = 2;

/// Height of the key hint footer.
const FOOTER_HEIGHT: u16 = 1;

fn settled_style() -> Style {
    Style::default().fg(Color::Yellow)
}

fn flip_style(phase: FlipPhase) -> Style {
    match phase {
        FlipPhase::Opening => settled_style().add_modifier(Modifier::REVERSED),
        FlipPhase::Closing => settled_style().add_modifier(Modifier::BOLD),
    }
}

/// Renders the entire screen to the frame.
pub fn render(state: &AppState, frame: &mut Frame) {
    let now = Instant::now();
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(area);

    render_header(state, frame, chunks[0], now);
    if state.screen == Screen::Departures {
        render_departures(state, frame, chunks[1], now);
    }
    render_footer(state, frame, chunks[2]);
}

fn render_header(state: &AppState, frame: &mut Frame, area: Rect, now: Instant) {
    let mut spans = vec![
        Span::styled("DEPARTURES", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("   UTC "),
    ];
    spans.extend(board_spans(&state.clock, now));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_departures(state: &AppState, frame: &mut Frame, area: Rect, now: Instant) {
    let mut lines = vec![header_line()];
    for row in state.rows.iter().take(state.visible_rows) {
        let mut spans: Vec<Span<'static>> = Vec::new();
        for (field, &(_, width)) in row.fields.iter().zip(COLUMNS) {
            spans.extend(field_spans(field, now, width as usize));
        }
        lines.push(Line::from(spans));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_footer(state: &AppState, frame: &mut Frame, area: Rect) {
    let motion = if state.reduced_motion { "off" } else { "on" };
    let hints = match state.screen {
        Screen::Departures => format!("q quit   r replay   m motion: {motion}"),
        Screen::ClockOnly => format!("q quit   m motion: {motion}"),
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            hints,
            Style::default().fg(Color::DarkGray),
        ))),
        area,
    );
}

fn header_line() -> Line<'static> {
    let mut text = String::new();
    for &(name, width) in COLUMNS {
        text.push_str(&format!("{name:<width$}", width = width as usize));
    }
    Line::from(Span::styled(
        text,
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
    ))
}

/// One span per cell, padded to the column width.
fn field_spans(field: &FieldBoard, now: Instant, width: usize) -> Vec<Span<'static>> {
    let snapshot: Vec<char> = field.board.snapshot().chars().collect();
    let mut spans: Vec<Span<'static>> = snapshot
        .iter()
        .enumerate()
        .map(|(index, &settled)| cell_span(field.host.frame(index, now), settled))
        .collect();
    if snapshot.len() < width {
        spans.push(Span::raw(" ".repeat(width - snapshot.len())));
    }
    spans
}

/// Spans for a board without column padding (the clock header).
fn board_spans(field: &FieldBoard, now: Instant) -> Vec<Span<'static>> {
    let len = field.board.len();
    field_spans(field, now, len)
}

fn cell_span(frame: Option<FlipFrame>, settled: char) -> Span<'static> {
    match frame {
        Some(flip) => Span::styled(flip.glyph.to_string(), flip_style(flip.phase)),
        None => Span::styled(settled.to_string(), settled_style()),
    }
}
