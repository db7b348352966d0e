//! Full-screen terminal frontend for the split-flap engine.

pub mod effects;
pub mod events;
pub mod host;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};

use anyhow::Result;
use flap_core::RevealConfig;
pub use host::TermHost;
pub use runtime::{DEFAULT_FPS, TuiRuntime};
pub use state::Screen;

/// Runs a board screen until the user quits.
pub async fn run_screen(screen: Screen, reveal: RevealConfig, fps: u32) -> Result<()> {
    // The board requires a terminal to render into.
    if !stderr().is_terminal() {
        anyhow::bail!("The split-flap board requires a terminal.");
    }

    let mut runtime = TuiRuntime::new(screen, reveal, runtime::frame_duration(fps))?;
    runtime.run()?;
    Ok(())
}
