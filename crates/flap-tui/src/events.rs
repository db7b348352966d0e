//! UI event types.
//!
//! Events flow into the reducer from the runtime: frame ticks, terminal
//! input, and row-due notifications from the stagger scheduler.

use crossterm::event::Event;

/// Events consumed by `update`.
#[derive(Debug)]
pub enum UiEvent {
    /// Frame cadence tick; drives rendering and host animation advance.
    Tick,
    /// Raw terminal input.
    Terminal(Event),
    /// Row `0..=index` should be visible; start revealing row `index`.
    RowDue(usize),
}
