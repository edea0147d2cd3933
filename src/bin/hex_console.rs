//! Terminal Hex: moves are typed as `row col`.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::debug;

use hex::config::PlayMode;
use hex::eval::min_moves_to_win;
use hex::{logging, AIEngine, AppConfig, Game, GameOutcome, Side, StrategyKind};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    VsAi,
    TwoPlayer,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SideArg {
    Red,
    Blue,
}

#[derive(Parser)]
#[command(name = "hex_console", about = "Play Hex in the terminal")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "hex.toml")]
    config: PathBuf,

    /// Override the game mode
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Side you play against the engine
    #[arg(long, value_enum)]
    human: Option<SideArg>,

    /// Override the board size
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
    if let Some(mode) = cli.mode {
        config.game.mode = match mode {
            ModeArg::VsAi => PlayMode::VsAi,
            ModeArg::TwoPlayer => PlayMode::TwoPlayer,
        };
    }
    if let Some(side) = cli.human {
        config.game.human_side = match side {
            SideArg::Red => Side::Red,
            SideArg::Blue => Side::Blue,
        };
    }
    if let Some(size) = cli.size {
        config.game.board_size = size;
    }
    if let Some(strategy) = cli.strategy {
        config.engine.strategy = strategy;
    }
    config.validate()?;

    let mut game = Game::new(config.game.board_size, config.game.game_mode())?;
    let mut engine = AIEngine::from_config(&config.engine);

    println!("Red connects left and right, Blue connects top and bottom.");
    println!("Enter moves as `row col`, `route` for the opponent's shortest route, `q` to quit.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while !game.is_over() {
        println!("\n{}", game.board());
        let (opponent, cost) = game.threat_level();
        println!("{opponent} needs {cost} more stone(s)");

        if game.is_automated_turn() {
            let side = game.to_move();
            let result = game.automated_turn(&mut engine)?;
            let Some(pos) = result.best_move else {
                bail!("engine found no move on a non-terminal board");
            };
            debug!(search_type = ?result.search_type, score = result.score, "engine result");
            println!("{side} plays {pos} ({} ms)", result.time_ms);
            continue;
        }

        print!("{} to move> ", game.to_move());
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line?;
        let input = line.trim();

        match input {
            "q" | "quit" => return Ok(()),
            "route" => {
                let route = min_moves_to_win(game.board(), opponent).path;
                let cells: Vec<String> = route.iter().map(ToString::to_string).collect();
                println!("{opponent} route: {}", cells.join(" "));
                continue;
            }
            _ => {}
        }

        let coords: Vec<i32> = input
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .filter_map(|s| s.parse().ok())
            .collect();
        let [row, col] = coords[..] else {
            println!("expected two numbers: row col");
            continue;
        };
        let Some(pos) = game.board().pos(row, col) else {
            println!("({row}, {col}) is off the board");
            continue;
        };
        if let Err(e) = game.human_move(pos) {
            println!("{e}");
        }
    }

    println!("\n{}", game.board());
    match game.outcome() {
        GameOutcome::Win(side) => println!("{side} wins after {} moves", game.moves_played()),
        GameOutcome::Draw => println!("Draw"),
        GameOutcome::Ongoing => {}
    }
    Ok(())
}
