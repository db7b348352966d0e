//! Terminal flip host.
//!
//! The engine waits for animation-completion events, and here those
//! events come from the frame tick: the runtime calls [`TermHost::advance`]
//! once per frame, which completes every flip whose fixed duration has
//! elapsed. Flips therefore pause with the render loop instead of
//! completing on a detached timer.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use flap_core::FlipHost;
use futures_util::future::BoxFuture;
use tokio::sync::oneshot;
use tokio::time::{Duration, Instant};

/// Default visual duration of one flip.
pub const FLIP_DURATION: Duration = Duration::from_millis(300);

/// Which half of the flip a cell is in, for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipPhase {
    /// First half: the outgoing glyph is folding away.
    Opening,
    /// Second half: the incoming glyph is falling into place.
    Closing,
}

/// What a mid-flip cell should draw this frame.
#[derive(Debug, Clone, Copy)]
pub struct FlipFrame {
    pub glyph: char,
    pub phase: FlipPhase,
}

struct ActiveFlip {
    index: usize,
    outgoing: char,
    incoming: char,
    started: Instant,
    done: Option<oneshot::Sender<()>>,
}

struct HostInner {
    flips: Vec<ActiveFlip>,
    attached: bool,
}

/// One terminal region a board renders into.
#[derive(Clone)]
pub struct TermHost {
    inner: Arc<Mutex<HostInner>>,
    flip_duration: Duration,
}

impl TermHost {
    pub fn new(flip_duration: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HostInner {
                flips: Vec::new(),
                attached: true,
            })),
            flip_duration,
        }
    }

    /// Completes every flip whose duration has elapsed as of `now`.
    ///
    /// This is the host's animation-completion event source; the runtime
    /// calls it once per frame.
    pub fn advance(&self, now: Instant) {
        let mut inner = self.lock();
        let duration = self.flip_duration;
        for flip in &mut inner.flips {
            if now.duration_since(flip.started) >= duration
                && let Some(done) = flip.done.take()
            {
                let _ = done.send(());
            }
        }
        inner.flips.retain(|flip| flip.done.is_some());
    }

    /// The transient glyph to draw for `index`, if it is mid-flip.
    pub fn frame(&self, index: usize, now: Instant) -> Option<FlipFrame> {
        let inner = self.lock();
        let flip = inner.flips.iter().find(|flip| flip.index == index)?;
        let elapsed = now.duration_since(flip.started);
        if elapsed < self.flip_duration / 2 {
            Some(FlipFrame {
                glyph: flip.outgoing,
                phase: FlipPhase::Opening,
            })
        } else {
            Some(FlipFrame {
                glyph: flip.incoming,
                phase: FlipPhase::Closing,
            })
        }
    }

    /// Marks the region gone and resolves outstanding completions.
    ///
    /// Late flips against a detached host become silent no-ops on the
    /// engine side.
    pub fn detach(&self) {
        let mut inner = self.lock();
        inner.attached = false;
        for mut flip in inner.flips.drain(..) {
            if let Some(done) = flip.done.take() {
                let _ = done.send(());
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, HostInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for TermHost {
    fn default() -> Self {
        Self::new(FLIP_DURATION)
    }
}

impl FlipHost for TermHost {
    fn animate(&self, index: usize, outgoing: char, incoming: char) -> BoxFuture<'static, ()> {
        let (tx, rx) = oneshot::channel();
        {
            let mut inner = self.lock();
            if !inner.attached {
                // No region to animate into; complete immediately.
                let _ = tx.send(());
            } else {
                inner.flips.push(ActiveFlip {
                    index,
                    outgoing,
                    incoming,
                    started: Instant::now(),
                    done: Some(tx),
                });
            }
        }
        Box::pin(async move {
            let _ = rx.await;
        })
    }

    fn is_attached(&self) -> bool {
        self.lock().attached
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_advance_completes_only_elapsed_flips() {
        let host = TermHost::new(Duration::from_millis(300));
        let mut done = host.animate(0, ' ', 'A');

        // Too early: the completion future stays pending.
        tokio::time::advance(Duration::from_millis(100)).await;
        host.advance(Instant::now());
        assert!(futures_util::poll!(&mut done).is_pending());
        assert!(host.frame(0, Instant::now()).is_some());

        tokio::time::advance(Duration::from_millis(250)).await;
        host.advance(Instant::now());
        done.await;
        assert!(host.frame(0, Instant::now()).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_frame_switches_glyph_at_halfway() {
        let host = TermHost::new(Duration::from_millis(300));
        let _done = host.animate(0, 'X', 'Y');

        let early = host.frame(0, Instant::now()).unwrap();
        assert_eq!(early.glyph, 'X');
        assert_eq!(early.phase, FlipPhase::Opening);

        tokio::time::advance(Duration::from_millis(200)).await;
        let late = host.frame(0, Instant::now()).unwrap();
        assert_eq!(late.glyph, 'Y');
        assert_eq!(late.phase, FlipPhase::Closing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_detach_resolves_outstanding_completions() {
        let host = TermHost::new(Duration::from_millis(300));
        let done = host.animate(0, ' ', 'A');
        host.detach();
        done.await;
        assert!(!host.is_attached());

        // New flips against a detached host complete immediately.
        host.animate(1, ' ', 'B').await;
    }
}
