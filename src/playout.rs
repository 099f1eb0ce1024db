//! Random playouts (game simulation) for position evaluation.
//!
//! A playout clones the game and plays uniformly random legal moves until
//! the game finishes or a ply cap is hit. The cap keeps playouts bounded on
//! large boards; a capped playout counts as a draw.

use crate::board::Player;
use crate::game::Game;

/// Play `game` out with uniformly random moves.
///
/// Moves are drawn from the live available-move set. Returns the winner, or
/// `None` for a draw, including the case where `max_depth` plies pass
/// without a decisive result.
pub fn random_playout(game: &Game, max_depth: usize, rng: &mut fastrand::Rng) -> Option<Player> {
    let mut playout = game.clone();
    let mut plies = 0;

    while plies < max_depth && !playout.is_finished() {
        let moves = playout.available_moves();
        let (x, y) = moves[rng.usize(..moves.len())];
        playout
            .play(x, y)
            .expect("moves drawn from the available set are legal");
        plies += 1;
    }

    if playout.is_finished() { playout.winner() } else { None }
}
