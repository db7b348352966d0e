//! Split-flap display engine.
//!
//! Simulates an airport departure board: character cells that visually flip
//! from one glyph to another. The engine is host-agnostic - it drives cell
//! state machines and scheduling, while a [`FlipHost`] implementation owns
//! the actual visual transition and reports its completion.
//!
//! ## Structure
//!
//! - `alphabet`: the cycling glyph set and placeholder classification
//! - `cell`: the per-character flip state machine
//! - `board`: an ordered sequence of cells bound to one host
//! - `reveal`: staggered scrambled-then-resolved text reveal
//! - `clock`: 1 Hz UTC clock driver built on single-step flips
//!
//! ## Concurrency model
//!
//! Single flips are strictly sequential per cell (a flip request while a
//! cell is mid-flip is a no-op that still resolves). Across cells there is
//! no ordering - staggering is intentional. All waits are tokio timers or
//! host completion futures; board teardown cancels everything through a
//! shared `CancellationToken`.

pub mod alphabet;
pub mod board;
pub mod cell;
pub mod clock;
pub mod host;
pub mod reveal;

pub use board::Board;
pub use cell::{CellKind, CellState, CellStatus};
pub use clock::ClockDriver;
pub use host::{FlipHost, InstantHost};
pub use reveal::{RevealConfig, animate_to_target, reveal};
