//! Per-character flip state machine.
//!
//! A cell holds one character position. Glyph cells flip; placeholder
//! cells (spaces and punctuation) show their character verbatim and never
//! animate. At most one flip is in flight per cell at any time.

use crate::alphabet::BLANK;

/// What kind of position a cell occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// A flippable character position.
    Glyph,
    /// A non-interactive position (space or punctuation), never flips.
    Placeholder,
}

/// Flip state of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStatus {
    Idle,
    Flipping,
}

/// One character position on a board.
///
/// Owned exclusively by its [`Board`](crate::Board); exposed to callers
/// only as a snapshot.
#[derive(Debug, Clone)]
pub struct CellState {
    pub kind: CellKind,
    /// The glyph currently shown.
    pub current: char,
    /// The incoming glyph while a flip is in flight.
    pub pending: Option<char>,
    pub status: CellStatus,
}

impl CellState {
    /// A flippable cell, initialized blank so reveals never start from
    /// stale content.
    pub fn glyph() -> Self {
        Self {
            kind: CellKind::Glyph,
            current: BLANK,
            pending: None,
            status: CellStatus::Idle,
        }
    }

    /// A placeholder showing `ch` verbatim.
    pub fn placeholder(ch: char) -> Self {
        Self {
            kind: CellKind::Placeholder,
            current: ch,
            pending: None,
            status: CellStatus::Idle,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.status == CellStatus::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::BLANK;

    #[test]
    fn test_glyph_cell_starts_blank_and_idle() {
        let cell = CellState::glyph();
        assert_eq!(cell.kind, CellKind::Glyph);
        assert_eq!(cell.current, BLANK);
        assert_eq!(cell.pending, None);
        assert!(cell.is_idle());
    }

    #[test]
    fn test_placeholder_shows_char_verbatim() {
        let cell = CellState::placeholder(':');
        assert_eq!(cell.kind, CellKind::Placeholder);
        assert_eq!(cell.current, ':');
        assert!(cell.is_idle());
    }
}
