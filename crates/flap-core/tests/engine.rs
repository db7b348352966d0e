//! End-to-end engine tests: flips, reveals, clock diffs, teardown.
//!
//! Time-dependent tests run under tokio's paused clock, so stagger delays
//! and animation durations advance deterministically.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use flap_core::clock::{CLOCK_TEMPLATE, clock_text};
use flap_core::host::{FlipHost, InstantHost};
use flap_core::{Board, CellStatus, RevealConfig, reveal};
use futures_util::future::{self, BoxFuture};

/// Host that counts animation requests and completes them immediately.
#[derive(Default)]
struct CountingHost {
    animations: AtomicUsize,
}

impl CountingHost {
    fn count(&self) -> usize {
        self.animations.load(Ordering::SeqCst)
    }

    fn reset(&self) {
        self.animations.store(0, Ordering::SeqCst);
    }
}

impl FlipHost for CountingHost {
    fn animate(&self, _index: usize, _outgoing: char, _incoming: char) -> BoxFuture<'static, ()> {
        self.animations.fetch_add(1, Ordering::SeqCst);
        Box::pin(future::ready(()))
    }
}

/// Host whose completions are released manually by the test.
#[derive(Default)]
struct ManualHost {
    pending: Mutex<Vec<tokio::sync::oneshot::Sender<()>>>,
}

impl ManualHost {
    fn release_all(&self) {
        let pending = std::mem::take(&mut *self.pending.lock().unwrap());
        for tx in pending {
            let _ = tx.send(());
        }
    }

    fn pending_count(&self) -> usize {
        self.pending.lock().unwrap().len()
    }
}

impl FlipHost for ManualHost {
    fn animate(&self, _index: usize, _outgoing: char, _incoming: char) -> BoxFuture<'static, ()> {
        let (tx, rx) = tokio::sync::oneshot::channel();
        self.pending.lock().unwrap().push(tx);
        Box::pin(async move {
            let _ = rx.await;
        })
    }
}

/// Host that takes a fixed duration per flip (virtual time).
struct TimedHost {
    duration: Duration,
}

impl FlipHost for TimedHost {
    fn animate(&self, _index: usize, _outgoing: char, _incoming: char) -> BoxFuture<'static, ()> {
        Box::pin(tokio::time::sleep(self.duration))
    }
}

#[tokio::test(start_paused = true)]
async fn test_reveal_settles_to_exact_text() {
    let board = Board::materialize("SIN", Arc::new(TimedHost {
        duration: Duration::from_millis(300),
    }));
    let started = reveal(&board, "SIN", &RevealConfig::default()).await;
    assert!(started);
    assert_eq!(board.snapshot(), "SIN");
    assert!(board.is_settled());
}

#[tokio::test(start_paused = true)]
async fn test_reveal_preserves_spaces_and_punctuation() {
    let text = "GATE B-12 OPEN";
    let board = Board::materialize(text, Arc::new(InstantHost));
    reveal(&board, text, &RevealConfig::default()).await;
    assert_eq!(board.snapshot(), text);
}

#[tokio::test(start_paused = true)]
async fn test_sequential_reveals_are_idempotent() {
    let board = Board::materialize("SIN", Arc::new(InstantHost));
    let config = RevealConfig::default();
    assert!(reveal(&board, "SIN", &config).await);
    assert!(reveal(&board, "SIN", &config).await);
    assert_eq!(board.snapshot(), "SIN");
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_reveal_is_ignored_without_corruption() {
    let board = Board::materialize("ABC", Arc::new(TimedHost {
        duration: Duration::from_millis(300),
    }));
    let first = tokio::spawn({
        let board = board.clone();
        async move { reveal(&board, "ABC", &RevealConfig::default()).await }
    });
    // Let the first reveal claim the board.
    tokio::task::yield_now().await;
    assert!(!reveal(&board, "XYZ", &RevealConfig::default()).await);

    assert!(first.await.unwrap());
    assert_eq!(board.snapshot(), "ABC");
    assert!(board.is_settled());
}

#[tokio::test(start_paused = true)]
async fn test_reduced_motion_never_animates() {
    let host = Arc::new(CountingHost::default());
    let board = Board::materialize("HIRE", Arc::clone(&host) as Arc<dyn FlipHost>);
    let config = RevealConfig::default().without_motion();
    reveal(&board, "HIRE", &config).await;
    assert_eq!(board.snapshot(), "HIRE");
    assert_eq!(host.count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_long_text_is_truncated_to_board_length() {
    let board = Board::materialize("ABC", Arc::new(InstantHost));
    assert!(reveal(&board, "ABCDEF", &RevealConfig::default()).await);
    assert_eq!(board.snapshot(), "ABC");
    assert!(board.is_settled());
}

#[tokio::test(start_paused = true)]
async fn test_short_text_leaves_trailing_cells_blank() {
    let board = Board::materialize("ABCDE", Arc::new(InstantHost));
    assert!(reveal(&board, "AB", &RevealConfig::default()).await);
    assert_eq!(board.snapshot(), "AB   ");
    assert!(board.is_settled());
}

#[tokio::test(start_paused = true)]
async fn test_invalid_characters_render_literally() {
    let board = Board::materialize("A!b", Arc::new(InstantHost));
    reveal(&board, "A!b", &RevealConfig::default()).await;
    assert_eq!(board.snapshot(), "A!b");
}

#[tokio::test(start_paused = true)]
async fn test_teardown_mid_reveal_freezes_board() {
    let board = Board::materialize("LONG TEXT HERE", Arc::new(TimedHost {
        duration: Duration::from_millis(300),
    }));
    let handle = tokio::spawn({
        let board = board.clone();
        async move { reveal(&board, "LONG TEXT HERE", &RevealConfig::default()).await }
    });
    tokio::time::advance(Duration::from_millis(150)).await;
    board.teardown();
    handle.await.unwrap();

    let frozen = board.snapshot();
    assert!(board.is_settled());
    tokio::time::advance(Duration::from_secs(10)).await;
    assert_eq!(board.snapshot(), frozen);
}

#[tokio::test]
async fn test_flip_while_flipping_keeps_inflight_outcome() {
    let host = Arc::new(ManualHost::default());
    let board = Board::materialize("A", Arc::clone(&host) as Arc<dyn FlipHost>);

    let inflight = tokio::spawn({
        let board = board.clone();
        async move { board.flip(0, 'A').await }
    });
    // Wait for the flip to register with the host.
    while host.pending_count() == 0 {
        tokio::task::yield_now().await;
    }
    assert_eq!(board.cell(0).unwrap().status, CellStatus::Flipping);

    // The re-entrant flip resolves immediately and changes nothing.
    board.flip(0, 'Z').await;
    assert_eq!(board.cell(0).unwrap().pending, Some('A'));

    host.release_all();
    inflight.await.unwrap();
    assert_eq!(board.snapshot(), "A");
    assert!(board.is_settled());
}

#[tokio::test(start_paused = true)]
async fn test_clock_boundary_flips_exactly_changed_digits() {
    let host = Arc::new(CountingHost::default());
    let board = Board::materialize(CLOCK_TEMPLATE, Arc::clone(&host) as Arc<dyn FlipHost>);

    // First update: every digit flips from blank, colons stay put.
    for (index, ch) in "12:59:59".chars().enumerate() {
        board.flip(index, ch).await;
    }
    assert_eq!(board.snapshot(), "12:59:59");
    assert_eq!(host.count(), 6);

    // Minute/hour rollover: six of eight positions change.
    host.reset();
    for (index, ch) in "13:00:00".chars().enumerate() {
        board.flip(index, ch).await;
    }
    assert_eq!(board.snapshot(), "13:00:00");
    assert_eq!(host.count(), 6);
}

#[tokio::test(start_paused = true)]
async fn test_clock_driver_renders_current_utc() {
    let board = Board::materialize(CLOCK_TEMPLATE, Arc::new(InstantHost));
    let driver = flap_core::ClockDriver::start(board.clone());

    // Let the first tick run.
    tokio::time::sleep(Duration::from_millis(10)).await;
    let shown = board.snapshot();
    let now = chrono::Utc::now();
    let acceptable: Vec<String> = (-2..=2)
        .map(|s| clock_text(now + chrono::Duration::seconds(s)))
        .collect();
    assert!(
        acceptable.contains(&shown),
        "clock showed {shown}, expected near {}",
        clock_text(now)
    );

    driver.stop();
    tokio::time::sleep(Duration::from_secs(3)).await;
    let frozen = board.snapshot();
    tokio::time::sleep(Duration::from_secs(3)).await;
    assert_eq!(board.snapshot(), frozen);
}
