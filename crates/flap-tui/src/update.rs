//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(state,
//! event)` and executes the returned effects.

use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::{AppState, Screen};

/// The main reducer function.
pub fn update(state: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => vec![],
        UiEvent::Terminal(term_event) => handle_terminal_event(state, &term_event),
        UiEvent::RowDue(index) => {
            if index >= state.rows.len() {
                return vec![];
            }
            state.visible_rows = state.visible_rows.max(index + 1);
            vec![UiEffect::RevealRow(index)]
        }
    }
}

fn handle_terminal_event(state: &mut AppState, event: &Event) -> Vec<UiEffect> {
    let Event::Key(key) = event else {
        return vec![];
    };
    if key.kind != KeyEventKind::Press {
        return vec![];
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            state.should_quit = true;
            vec![UiEffect::Quit]
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.should_quit = true;
            vec![UiEffect::Quit]
        }
        KeyCode::Char('r') if state.screen == Screen::Departures => {
            state.rebuild_rows();
            vec![UiEffect::ScheduleRows]
        }
        KeyCode::Char('m') => {
            state.reduced_motion = !state.reduced_motion;
            vec![]
        }
        _ => vec![],
    }
}
