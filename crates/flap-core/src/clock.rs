//! Live UTC clock on a fixed 8-cell board.
//!
//! The clock board is shaped once from [`CLOCK_TEMPLATE`] and never
//! rebuilt; digits are flipped in place, one single-step flip per changed
//! digit, no scrambling. Every tick recomputes the time from the wall
//! clock, so ticks skipped while the process is suspended never
//! accumulate drift.

use chrono::{DateTime, Utc};
use futures_util::future;
use tokio::time::{Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::board::Board;

/// Shape of the clock board: `HH:MM:SS`, colons as placeholders.
pub const CLOCK_TEMPLATE: &str = "00:00:00";

/// `HH:MM:SS`, 24-hour, zero-padded.
pub fn clock_text(t: DateTime<Utc>) -> String {
    t.format("%H:%M:%S").to_string()
}

/// Drives a clock board at 1 Hz.
///
/// Exactly one timer per driver; [`stop`](ClockDriver::stop) or dropping
/// the driver cancels it, letting in-flight flips finish naturally.
pub struct ClockDriver {
    cancel: CancellationToken,
}

impl ClockDriver {
    /// Starts the clock on `board`.
    ///
    /// The first tick fires immediately, flipping every glyph cell whose
    /// character differs from the board (all of them, on a fresh board).
    /// Unchanged digits receive flip requests that are guaranteed no-ops,
    /// so no pre-filtering is needed.
    pub fn start(board: Board) -> Self {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        tokio::spawn(async move {
            let mut ticks = tokio::time::interval(Duration::from_secs(1));
            ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = ticks.tick() => {}
                    () = token.cancelled() => break,
                }
                let text = clock_text(Utc::now());
                let flips = text
                    .chars()
                    .enumerate()
                    .map(|(index, ch)| board.flip(index, ch));
                future::join_all(flips).await;
                if board.is_torn_down() {
                    break;
                }
            }
            tracing::debug!("clock driver stopped");
        });
        Self { cancel }
    }

    /// Cancels the repeating timer. In-flight flips finish naturally.
    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

impl Drop for ClockDriver {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
