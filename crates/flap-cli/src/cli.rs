//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use flap_tui::Screen;

use crate::{config, logging};

#[derive(Parser)]
#[command(name = "flap")]
#[command(version)]
#[command(about = "Split-flap departure board for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to a config file (default: ./flap.toml if present)
    #[arg(long, value_name = "PATH")]
    config: Option<String>,

    /// Skip flip cycling and render final text directly
    #[arg(long)]
    reduced_motion: bool,

    /// Target render rate in frames per second
    #[arg(long, value_name = "N", default_value_t = flap_tui::DEFAULT_FPS)]
    fps: u32,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Departure-board demo with a live UTC clock (default)
    Board,
    /// UTC clock only
    Clock,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = logging::init();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let mut config = config::load(cli.config.as_deref()).context("load config")?;
    if cli.reduced_motion {
        config.reveal.reduced_motion = true;
    }

    let screen = match cli.command.unwrap_or(Commands::Board) {
        Commands::Board => Screen::Departures,
        Commands::Clock => Screen::ClockOnly,
    };
    tracing::debug!(
        reduced_motion = config.reveal.reduced_motion,
        fps = cli.fps,
        "starting board screen"
    );
    flap_tui::run_screen(screen, config.reveal, cli.fps).await
}
