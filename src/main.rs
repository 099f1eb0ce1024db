//! gomoku-rust: an N-in-a-row board game with a UCT computer opponent.
//!
//! ## Usage
//!
//! - `gomoku-rust` - Play an interactive two-player game
//! - `gomoku-rust --bot` - Play against the computer (it answers as `X`)
//! - `gomoku-rust demo` - Run a single engine search on an empty board
//!
//! Board geometry and the search budget are set with `--width`,
//! `--height`, `--win-count`, `--time-limit` / `--iterations` and
//! `--seed`. Diagnostics go through `env_logger`; run with
//! `RUST_LOG=debug` to watch the search work.

use std::time::Duration;

use clap::{Parser, Subcommand};

use gomoku_rust::board::BoardSpec;
use gomoku_rust::cli::Session;
use gomoku_rust::constants::{DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_WINNING_COUNT};
use gomoku_rust::game::Game;
use gomoku_rust::mcts::Uct;

/// An N-in-a-row board game with a Monte Carlo tree search opponent
#[derive(Parser)]
#[command(name = "gomoku-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Board width
    #[arg(long, default_value_t = DEFAULT_BOARD_WIDTH)]
    width: usize,

    /// Board height
    #[arg(long, default_value_t = DEFAULT_BOARD_HEIGHT)]
    height: usize,

    /// Aligned stones required to win
    #[arg(long, default_value_t = DEFAULT_WINNING_COUNT)]
    win_count: usize,

    /// Let the computer play the second side
    #[arg(long)]
    bot: bool,

    /// Search budget in seconds
    #[arg(long)]
    time_limit: Option<f64>,

    /// Search budget in iterations (overrides the time limit)
    #[arg(long)]
    iterations: Option<usize>,

    /// Seed for reproducible engine behavior
    #[arg(long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game (the default)
    Play,
    /// Run one engine search on an empty board and print the chosen move
    Demo,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let spec = BoardSpec::new(cli.width, cli.height, cli.win_count);
    let engine = build_engine(&cli);

    match cli.command {
        Some(Commands::Demo) => run_demo(spec, engine),
        Some(Commands::Play) | None => {
            let bot = cli.bot.then_some(engine);
            Session::new(Game::new(spec), bot).run()?;
            Ok(())
        }
    }
}

fn build_engine(cli: &Cli) -> Uct {
    let mut engine = Uct::new();
    if let Some(secs) = cli.time_limit {
        engine = engine.with_time_limit(Duration::from_secs_f64(secs));
    }
    if let Some(limit) = cli.iterations {
        engine = engine.with_iteration_limit(limit);
    }
    if let Some(seed) = cli.seed {
        engine = engine.with_seed(seed);
    }
    engine
}

fn run_demo(spec: BoardSpec, mut engine: Uct) -> anyhow::Result<()> {
    let game = Game::new(spec);
    println!("Searching an opening move for player {}...", game.to_move());

    let (x, y) = engine.search(&game);
    println!("Engine plays {x},{y}");
    Ok(())
}
