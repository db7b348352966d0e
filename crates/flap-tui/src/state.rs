//! Application state for the board screens.
//!
//! State is plain data plus board handles; all mutation happens in the
//! reducer (`update`) and all I/O in the runtime. Each text field on
//! screen owns its own board and host - cells are never shared.

use std::sync::Arc;

use flap_core::clock::CLOCK_TEMPLATE;
use flap_core::{Board, RevealConfig};
use tokio::time::Duration;

use crate::host::TermHost;

/// Extra base delay per field column, so the five columns of a row do not
/// resolve in one synchronized wave.
pub const FIELD_STAGGER_MS: u64 = 120;

/// Delay between consecutive rows appearing on the board.
pub const ROW_STAGGER: Duration = Duration::from_secs(1);

/// Column layout of the departure table: header and width.
pub const COLUMNS: &[(&str, u16)] = &[
    ("FLIGHT", 8),
    ("TIME", 7),
    ("DESTINATION", 18),
    ("GATE", 6),
    ("STATUS", 12),
];

/// Demo departures rendered by the board screen.
pub const DEPARTURES: &[[&str; 5]] = &[
    ["SQ101", "06:05", "SINGAPORE", "SIN", "BOARDING"],
    ["KE204", "07:40", "SEOUL INCHEON", "ICN", "ON TIME"],
    ["MU318", "08:15", "SHANGHAI", "PVG", "ON TIME"],
    ["CX452", "09:30", "HONG KONG", "HKG", "DELAYED"],
    ["AA577", "11:20", "MINNEAPOLIS", "MSP", "ON TIME"],
    ["QF690", "12:45", "SYDNEY", "SYD", "CANCELLED"],
];

/// A board mounted into one terminal region.
pub struct FieldBoard {
    /// The text this field settles to.
    pub target: String,
    pub board: Board,
    pub host: TermHost,
}

impl FieldBoard {
    /// Materializes a blank board shaped like `target`.
    pub fn new(target: &str) -> Self {
        let host = TermHost::default();
        let board = Board::materialize(target, Arc::new(host.clone()));
        Self {
            target: target.to_string(),
            board,
            host,
        }
    }

    /// Discards the old cells and re-materializes blank ones.
    pub fn rebuild(&mut self) {
        self.board.teardown();
        self.host.detach();
        let host = TermHost::default();
        self.board = Board::materialize(&self.target, Arc::new(host.clone()));
        self.host = host;
    }
}

/// One departure row: five field boards.
pub struct DepartureRow {
    pub fields: Vec<FieldBoard>,
}

impl DepartureRow {
    fn new(texts: &[&str; 5]) -> Self {
        Self {
            fields: texts.iter().map(|text| FieldBoard::new(text)).collect(),
        }
    }
}

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Departures,
    ClockOnly,
}

/// Top-level state for the TUI.
pub struct AppState {
    pub screen: Screen,
    pub clock: FieldBoard,
    pub rows: Vec<DepartureRow>,
    /// Rows that have scrolled "into view" and started revealing.
    pub visible_rows: usize,
    pub reveal: RevealConfig,
    pub reduced_motion: bool,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(screen: Screen, reveal: RevealConfig) -> Self {
        let reduced_motion = reveal.reduced_motion;
        let rows = match screen {
            Screen::Departures => DEPARTURES.iter().map(DepartureRow::new).collect(),
            Screen::ClockOnly => Vec::new(),
        };
        Self {
            screen,
            clock: FieldBoard::new(CLOCK_TEMPLATE),
            rows,
            visible_rows: 0,
            reveal,
            reduced_motion,
            should_quit: false,
        }
    }

    /// The reveal configuration for one field of one row.
    ///
    /// Columns get increasing base delays and the current reduced-motion
    /// preference is applied on top of the configured timings.
    pub fn field_config(&self, field_index: usize) -> RevealConfig {
        let mut config = self.reveal.clone();
        config.base_delay_ms += field_index as u64 * FIELD_STAGGER_MS;
        config.reduced_motion = self.reduced_motion;
        config
    }

    /// Rebuilds every row board blank, for a replay.
    pub fn rebuild_rows(&mut self) {
        for row in &mut self.rows {
            for field in &mut row.fields {
                field.rebuild();
            }
        }
        self.visible_rows = 0;
    }

    /// Completes elapsed flip animations on every host.
    pub fn advance_hosts(&self, now: tokio::time::Instant) {
        self.clock.host.advance(now);
        for row in &self.rows {
            for field in &row.fields {
                field.host.advance(now);
            }
        }
    }
}
