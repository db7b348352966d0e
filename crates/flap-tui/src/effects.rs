//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime
//! executes. They represent task spawning only; the reducer itself never
//! spawns or performs I/O.

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,
    /// Start the row stagger scheduler (sends `RowDue` once per row).
    ScheduleRows,
    /// Spawn the reveal chains for every field of one row.
    RevealRow(usize),
}
