//! Board: an ordered sequence of cells bound to one host.
//!
//! A board is materialized from a text (which fixes its shape) and torn
//! down as a unit. Handles are cheap clones of shared state so reveal and
//! clock tasks can drive cells concurrently; the cells themselves are
//! never shared across boards.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio_util::sync::CancellationToken;

use crate::alphabet;
use crate::cell::{CellKind, CellState, CellStatus};
use crate::host::FlipHost;

/// An ordered collection of cells mounted into one [`FlipHost`].
#[derive(Clone)]
pub struct Board {
    cells: Arc<Mutex<Vec<CellState>>>,
    host: Arc<dyn FlipHost>,
    cancel: CancellationToken,
    revealing: Arc<AtomicBool>,
}

impl Board {
    /// Builds a board shaped like `text`.
    ///
    /// Cycling characters become glyph cells initialized blank; spaces and
    /// punctuation become placeholders showing their character verbatim.
    /// No animation is started.
    pub fn materialize(text: &str, host: Arc<dyn FlipHost>) -> Self {
        let cells = text
            .chars()
            .map(|ch| {
                if alphabet::cycles(ch) {
                    CellState::glyph()
                } else {
                    CellState::placeholder(ch)
                }
            })
            .collect();
        Self {
            cells: Arc::new(Mutex::new(cells)),
            host,
            cancel: CancellationToken::new(),
            revealing: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flips the cell at `index` to `next`.
    ///
    /// No-op cases resolve immediately so chained callers are never
    /// stalled: out-of-range index, torn-down board, detached host,
    /// placeholder cell, cell already flipping, or `next` equal to the
    /// current glyph. Otherwise the cell enters `Flipping`, the host
    /// animates the transition, and on its completion event the glyph
    /// commits and the cell returns to `Idle`.
    ///
    /// Teardown mid-flight discards the transient state and leaves the
    /// glyph unchanged.
    pub async fn flip(&self, index: usize, next: char) {
        let animation = {
            let mut cells = self.lock_cells();
            let Some(cell) = cells.get_mut(index) else {
                return;
            };
            if self.cancel.is_cancelled() || !self.host.is_attached() {
                return;
            }
            if cell.kind == CellKind::Placeholder {
                return;
            }
            if cell.status == CellStatus::Flipping || cell.current == next {
                return;
            }
            cell.status = CellStatus::Flipping;
            cell.pending = Some(next);
            self.host.animate(index, cell.current, next)
        };

        let cancelled = tokio::select! {
            () = animation => false,
            () = self.cancel.cancelled() => true,
        };

        let mut cells = self.lock_cells();
        if let Some(cell) = cells.get_mut(index) {
            if cancelled {
                cell.pending = None;
                cell.status = CellStatus::Idle;
            } else if let Some(pending) = cell.pending.take() {
                cell.current = pending;
                cell.status = CellStatus::Idle;
            }
        }
    }

    /// Sets a glyph cell directly, with no animation.
    ///
    /// The reduced-motion path and non-cycling reveal targets use this.
    /// Placeholders and mid-flip cells are left alone.
    pub(crate) fn set_current(&self, index: usize, next: char) {
        let mut cells = self.lock_cells();
        if let Some(cell) = cells.get_mut(index)
            && cell.kind == CellKind::Glyph
            && cell.status == CellStatus::Idle
        {
            cell.current = next;
        }
    }

    /// The rendered glyph sequence, character for character.
    pub fn snapshot(&self) -> String {
        self.lock_cells().iter().map(|cell| cell.current).collect()
    }

    /// A copy of the cell at `index`, if any.
    pub fn cell(&self, index: usize) -> Option<CellState> {
        self.lock_cells().get(index).cloned()
    }

    /// Number of character positions, placeholders included.
    pub fn len(&self) -> usize {
        self.lock_cells().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_cells().is_empty()
    }

    /// Whether every cell is idle (no flip in flight).
    pub fn is_settled(&self) -> bool {
        self.lock_cells().iter().all(CellState::is_idle)
    }

    /// Tears the board down.
    ///
    /// Pending stagger timers die, late animation completions become
    /// no-ops, and no further glyph changes occur. Queries remain safe.
    pub fn teardown(&self) {
        tracing::debug!(len = self.len(), "board teardown");
        self.cancel.cancel();
    }

    pub fn is_torn_down(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Marks the board busy with a reveal. Returns `false` if one is
    /// already in flight.
    pub(crate) fn begin_reveal(&self) -> bool {
        self.revealing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub(crate) fn end_reveal(&self) {
        self.revealing.store(false, Ordering::Release);
    }

    pub(crate) fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    fn lock_cells(&self) -> MutexGuard<'_, Vec<CellState>> {
        self.cells.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
