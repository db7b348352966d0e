//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! All side effects happen here. The reducer stays pure and produces
//! effects; this module executes them by spawning engine tasks.
//!
//! ## Inbox pattern
//!
//! Spawned tasks (the row stagger scheduler) send `UiEvent`s to
//! `inbox_tx`; the runtime drains `inbox_rx` each frame. The frame tick
//! also advances every `TermHost`, which is what completes flip
//! animations - flips never finish while the loop is not running.

use std::io::Stdout;

use anyhow::{Context, Result};
use crossterm::event;
use flap_core::{ClockDriver, RevealConfig, reveal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use tokio::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::{AppState, ROW_STAGGER, Screen};
use crate::{render, terminal, update};

/// Default render rate when the caller does not pick one.
pub const DEFAULT_FPS: u32 = 30;

/// Frame cadence for a target render rate. The cadence sets the input
/// poll timeout, host advance, and redraw interval.
pub fn frame_duration(fps: u32) -> Duration {
    Duration::from_millis(1000 / u64::from(fps.max(1)))
}

/// Full-screen board runtime.
///
/// Owns the terminal and state. Terminal state is restored on normal
/// exit and on panic via the installed hook.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    inbox_tx: mpsc::UnboundedSender<UiEvent>,
    inbox_rx: mpsc::UnboundedReceiver<UiEvent>,
    clock: ClockDriver,
    frame_duration: Duration,
    /// Cancels the current row-stagger scheduler; replaced on replay so a
    /// stale scheduler never drives rebuilt boards.
    scheduler: CancellationToken,
}

impl TuiRuntime {
    /// Creates the runtime, enters the alternate screen, and starts the
    /// clock driver.
    pub fn new(
        screen: Screen,
        reveal_config: RevealConfig,
        frame_duration: Duration,
    ) -> Result<Self> {
        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let state = AppState::new(screen, reveal_config);
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        let clock = ClockDriver::start(state.clock.board.clone());

        Ok(Self {
            terminal,
            state,
            inbox_tx,
            inbox_rx,
            clock,
            frame_duration,
            scheduler: CancellationToken::new(),
        })
    }

    /// Runs the event loop until quit.
    pub fn run(&mut self) -> Result<()> {
        let mut effects = vec![UiEffect::ScheduleRows];
        loop {
            for effect in std::mem::take(&mut effects) {
                self.execute(effect);
            }

            // Drain events produced by spawned tasks.
            while let Ok(inbox_event) = self.inbox_rx.try_recv() {
                effects.extend(update::update(&mut self.state, inbox_event));
            }

            // Poll terminal input for at most one frame.
            if event::poll(self.frame_duration).context("Failed to poll terminal events")? {
                let term_event = event::read().context("Failed to read terminal event")?;
                effects.extend(update::update(&mut self.state, UiEvent::Terminal(term_event)));
            }

            // Frame tick: complete elapsed flips, then draw.
            self.state.advance_hosts(Instant::now());
            effects.extend(update::update(&mut self.state, UiEvent::Tick));
            self.terminal
                .draw(|frame| render::render(&self.state, frame))
                .context("Failed to draw frame")?;

            if self.state.should_quit {
                break;
            }
        }

        self.shutdown();
        terminal::restore_terminal()?;
        Ok(())
    }

    fn execute(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }
            UiEffect::ScheduleRows => {
                // A replay must not leave the previous scheduler driving
                // the rebuilt boards out of order.
                self.scheduler.cancel();
                self.scheduler = CancellationToken::new();
                spawn_row_scheduler(
                    self.inbox_tx.clone(),
                    self.state.rows.len(),
                    self.scheduler.clone(),
                );
            }
            UiEffect::RevealRow(index) => {
                let Some(row) = self.state.rows.get(index) else {
                    return;
                };
                tracing::debug!(row = index, "revealing row");
                for (field_index, field) in row.fields.iter().enumerate() {
                    let board = field.board.clone();
                    let target = field.target.clone();
                    let config = self.state.field_config(field_index);
                    tokio::spawn(async move {
                        reveal(&board, &target, &config).await;
                    });
                }
            }
        }
    }

    /// Tears every board down so in-flight chains stop cleanly.
    fn shutdown(&mut self) {
        self.scheduler.cancel();
        self.clock.stop();
        self.state.clock.board.teardown();
        self.state.clock.host.detach();
        for row in &self.state.rows {
            for field in &row.fields {
                field.board.teardown();
                field.host.detach();
            }
        }
    }
}

/// Spawns the row-stagger scheduler: `RowDue(0)` immediately, then one
/// row per [`ROW_STAGGER`]. Cancelling the token stops it between rows.
fn spawn_row_scheduler(
    tx: mpsc::UnboundedSender<UiEvent>,
    rows: usize,
    cancel: CancellationToken,
) {
    tokio::spawn(async move {
        for index in 0..rows {
            if cancel.is_cancelled() || tx.send(UiEvent::RowDue(index)).is_err() {
                return;
            }
            tokio::select! {
                () = tokio::time::sleep(ROW_STAGGER) => {}
                () = cancel.cancelled() => return,
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_duration_from_fps() {
        assert_eq!(frame_duration(DEFAULT_FPS), Duration::from_millis(33));
        assert_eq!(frame_duration(10), Duration::from_millis(100));
        // fps 0 is clamped instead of dividing by zero.
        assert_eq!(frame_duration(0), Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_row_scheduler_sends_rows_in_order() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        spawn_row_scheduler(tx, 3, CancellationToken::new());

        for expected in 0..3 {
            let event = rx.recv().await;
            assert!(matches!(event, Some(UiEvent::RowDue(index)) if index == expected));
        }
        // Scheduler finished; its sender is gone.
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_scheduler_stops_and_replacement_restarts() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        spawn_row_scheduler(tx.clone(), 6, cancel.clone());

        assert!(matches!(rx.recv().await, Some(UiEvent::RowDue(0))));
        assert!(matches!(rx.recv().await, Some(UiEvent::RowDue(1))));

        // Replay: the old scheduler stops mid-run, the new one starts
        // over from the top.
        cancel.cancel();
        spawn_row_scheduler(tx, 6, CancellationToken::new());
        assert!(matches!(rx.recv().await, Some(UiEvent::RowDue(0))));
        assert!(matches!(rx.recv().await, Some(UiEvent::RowDue(1))));
    }
}
