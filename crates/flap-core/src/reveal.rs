//! Staggered scrambled-then-resolved text reveal.
//!
//! Each cycling position runs an independent flip chain: a stagger delay,
//! a few flips to random glyphs, then the final flip to its target. The
//! chain advances only on flip completion, never on a fixed timer, so no
//! flip starts before the previous one has fully resolved on that cell.

use std::time::Duration;

use rand::Rng;
use serde::Deserialize;

use crate::alphabet;
use crate::board::Board;

/// Timing and behavior knobs for [`reveal`].
///
/// Callers tune delays per section so multiple boards on one screen do
/// not resolve in synchronized waves.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Delay before the first position starts, in milliseconds.
    pub base_delay_ms: u64,
    /// Additional delay per character position.
    pub per_char_delay_ms: u64,
    /// Upper bound of the random jitter added to each position's delay.
    pub jitter_max_ms: u64,
    /// Fewest flips a cell performs before settling (1 = direct flip).
    pub min_cycles: u32,
    /// Most flips a cell performs before settling.
    pub max_cycles: u32,
    /// Skip cycling entirely and set final glyphs directly.
    pub reduced_motion: bool,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            base_delay_ms: 0,
            per_char_delay_ms: 100,
            jitter_max_ms: 500,
            min_cycles: 3,
            max_cycles: 7,
            reduced_motion: false,
        }
    }
}

impl RevealConfig {
    /// A copy with cycling disabled, for reduced-motion callers.
    pub fn without_motion(&self) -> Self {
        Self {
            reduced_motion: true,
            ..self.clone()
        }
    }

    fn cycle_range(&self) -> (u32, u32) {
        let min = self.min_cycles.max(1);
        (min, self.max_cycles.max(min))
    }
}

/// Drives one cell through `cycles - 1` random glyphs, then flips it to
/// `target`. With `cycles == 1` the only flip is directly to `target`.
pub async fn animate_to_target(board: &Board, index: usize, target: char, cycles: u32) {
    for _ in 1..cycles {
        let glyph = alphabet::random_glyph(&mut rand::rng());
        board.flip(index, glyph).await;
    }
    board.flip(index, target).await;
}

/// Reveals `text` across `board` with per-position stagger.
///
/// Placeholder positions and non-cycling target characters render
/// immediately; cycling positions scramble and settle. Resolves once every
/// position has settled, which is the board's "settled" signal.
///
/// A second reveal while one is in flight on the same board is ignored
/// and returns `false`. Text longer than the board is truncated; a short
/// text leaves trailing cells blank.
pub async fn reveal(board: &Board, text: &str, config: &RevealConfig) -> bool {
    if !board.begin_reveal() {
        tracing::debug!(text, "reveal ignored: board busy");
        return false;
    }
    tracing::debug!(text, reduced_motion = config.reduced_motion, "reveal start");

    let len = board.len();
    let targets: Vec<(usize, char)> = text.chars().take(len).enumerate().collect();

    if config.reduced_motion {
        // Identical terminal state as the animated path, only faster.
        for &(index, ch) in &targets {
            board.set_current(index, ch);
        }
        board.end_reveal();
        return true;
    }

    let mut chains = tokio::task::JoinSet::new();
    {
        let mut rng = rand::rng();
        let (min_cycles, max_cycles) = config.cycle_range();
        for &(index, ch) in &targets {
            if !alphabet::cycles(ch) {
                // Invalid or placeholder characters render literally,
                // without cycling.
                board.set_current(index, ch);
                continue;
            }
            let delay = Duration::from_millis(
                config.base_delay_ms
                    + index as u64 * config.per_char_delay_ms
                    + rng.random_range(0..=config.jitter_max_ms),
            );
            let cycles = rng.random_range(min_cycles..=max_cycles);
            let board = board.clone();
            let cancel = board.cancel_token();
            chains.spawn(async move {
                tokio::select! {
                    () = tokio::time::sleep(delay) => {
                        animate_to_target(&board, index, ch, cycles).await;
                    }
                    () = cancel.cancelled() => {}
                }
            });
        }
    }
    while chains.join_next().await.is_some() {}

    board.end_reveal();
    tracing::debug!(text, "reveal settled");
    true
}
