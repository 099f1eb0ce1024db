//! An N-in-a-row board game (Gomoku-style) with a Monte Carlo tree search
//! computer opponent.
//!
//! Two players alternately place stones on a rectangular grid; the first to
//! align `winning_count` stones horizontally, vertically or diagonally
//! wins. Board size and run length are configurable, defaulting to a 10x10
//! board requiring five in a row. Computer moves come from a single-
//! threaded UCT search with a wall-clock or iteration budget.
//!
//! ## Modules
//!
//! - [`constants`] - Board and engine defaults
//! - [`board`] - Grid state, move validation, win detection
//! - [`game`] - Turn-taking state machine over a board
//! - [`playout`] - Random game completion used by the search
//! - [`mcts`] - Monte Carlo Tree Search (UCT) move selection
//! - [`cli`] - Interactive text-mode session
//!
//! ## Example
//!
//! ```
//! use gomoku_rust::board::BoardSpec;
//! use gomoku_rust::game::Game;
//! use gomoku_rust::mcts::Uct;
//!
//! // A 5x5 board where three in a row wins.
//! let mut game = Game::new(BoardSpec::new(5, 5, 3));
//! game.play(2, 2).unwrap();
//!
//! // Let the engine answer for the other player.
//! let mut engine = Uct::new().with_iteration_limit(500).with_seed(7);
//! let (x, y) = engine.search(&game);
//! game.play(x, y).unwrap();
//! assert!(!game.is_finished());
//! ```

pub mod board;
pub mod cli;
pub mod constants;
pub mod game;
pub mod mcts;
pub mod playout;
