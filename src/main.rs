//! Hex GUI
//!
//! Play Hex against the engine or another person.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::info;

use hex::board::{UI_MAX_SIZE, UI_MIN_SIZE};
use hex::ui::{GameState, HexApp};
use hex::{logging, AppConfig, StrategyKind};

#[derive(Parser)]
#[command(name = "hex", about = "Play Hex against the engine")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "hex.toml")]
    config: PathBuf,

    /// Override the board size (7 to 11)
    #[arg(long)]
    size: Option<usize>,

    /// Override the engine strategy: heuristic, minimax or monte-carlo
    #[arg(long)]
    strategy: Option<StrategyKind>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(logging::directive(cli.verbose));

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(size) = cli.size {
        config.game.board_size = size;
    }
    if let Some(strategy) = cli.strategy {
        config.engine.strategy = strategy;
    }
    config.game.board_size = config.game.board_size.clamp(UI_MIN_SIZE, UI_MAX_SIZE);

    let state = GameState::new(config).context("creating the game")?;
    info!(
        size = state.game.board().size(),
        strategy = %state.strategy(),
        "starting GUI"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 750.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Hex"),
        ..Default::default()
    };

    eframe::run_native(
        "Hex",
        options,
        Box::new(|cc| Ok(Box::new(HexApp::new(cc, state)))),
    )
    .map_err(|e| anyhow!("GUI failed: {e}"))
}
