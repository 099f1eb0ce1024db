//! Turn-taking game state machine.
//!
//! A [`Game`] wraps one [`Board`] and tracks whose turn it is, whether the
//! game has ended and who won. Circle always moves first. Cloning a game
//! deep-copies its board, which is how the search engine obtains disposable
//! what-if continuations.

use crate::board::{Board, BoardError, BoardSpec, Coord, Move, Player};

/// Errors reported by [`Game::play`]. Both variants are recoverable; the
/// game state is never left partially mutated.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The game has ended; no further moves are accepted.
    #[error("the game has already finished")]
    Finished,
    /// The board rejected the placement.
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// A running or finished game.
#[derive(Clone)]
pub struct Game {
    board: Board,
    to_move: Player,
    finished: bool,
    winner: Option<Player>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(BoardSpec::default())
    }
}

impl Game {
    /// Start a fresh game on an empty board. Circle is to move.
    pub fn new(spec: BoardSpec) -> Self {
        Self {
            board: Board::new(spec),
            to_move: Player::Circle,
            finished: false,
            winner: None,
        }
    }

    /// Place a stone for the player whose turn it is.
    ///
    /// On a winning placement the game finishes with that player as winner;
    /// on filling the last cell without a win it finishes as a draw;
    /// otherwise the turn passes to the other player.
    ///
    /// # Errors
    /// [`GameError::Finished`] once the game has ended, or the underlying
    /// [`BoardError`] for an out-of-range or occupied coordinate.
    pub fn play(&mut self, x: usize, y: usize) -> Result<(), GameError> {
        if self.finished {
            return Err(GameError::Finished);
        }

        let mv = Move::new(x, y, self.to_move);
        self.board.place_move(mv)?;

        if self.board.is_winning_move(mv) {
            self.finished = true;
            self.winner = Some(mv.player);
        } else if self.board.available_moves().is_empty() {
            self.finished = true; // draw, `winner` stays None
        } else {
            self.to_move = self.to_move.other();
        }
        Ok(())
    }

    /// Player whose turn it is. Meaningless once the game has finished.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The winning player, or `None` while in progress and on a draw.
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Still-empty coordinates, delegated to the board.
    pub fn available_moves(&self) -> &[Coord] {
        self.board.available_moves()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }
}
