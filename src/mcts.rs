//! Monte Carlo Tree Search (UCT) move selection.
//!
//! The engine repeats four phases until its budget runs out:
//!
//! 1. **Selection** - descend from the root along UCB1-maximizing children
//!    until a node with untried moves is reached, recording the path of
//!    child indices.
//! 2. **Expansion** - replay the path onto a clone of the game, pick one
//!    untried move at random and add a child node for it.
//! 3. **Playout** - finish the cloned game with uniformly random moves
//!    (see [`crate::playout`]).
//! 4. **Backpropagation** - fold the playout result into every node along
//!    the path, scored from each node's own mover perspective.
//!
//! The move finally returned is the root child with the most visits (the
//! "robust child" rule); visit counts are the more stable signal under a
//! finite budget than raw win rates. If an expansion directly below the
//! root already wins the game for the searching player, the search stops
//! at once and returns that move.

use std::time::{Duration, Instant};

use log::{debug, trace};

use crate::board::{Coord, Player};
use crate::constants::{DEFAULT_EXPLORATION, DEFAULT_PLAYOUT_MAX_DEPTH, DEFAULT_TIME_LIMIT_SECS};
use crate::game::Game;
use crate::playout::random_playout;

/// A node in the search tree.
///
/// `player` is the *mover*: the player whose move created this node. The
/// backpropagated reward is computed from that player's perspective, so a
/// node's score reflects how often its move worked out for whoever made it.
pub struct UctNode {
    /// Move that produced this node; `None` only for the root.
    pub mv: Option<Coord>,
    /// Player who made that move.
    pub player: Player,
    /// Children in creation order.
    pub children: Vec<UctNode>,
    /// Number of times this node was part of a simulation.
    pub visits: u32,
    /// Accumulated reward: +1 per win for `player`, +0.5 per draw, -1 per loss.
    pub score: f64,
    /// Whether legal moves without a child node remain below this node.
    pub expandable: bool,
}

impl UctNode {
    fn new(mv: Option<Coord>, player: Player) -> Self {
        Self {
            mv,
            player,
            children: Vec::new(),
            visits: 0,
            score: 0.0,
            expandable: true,
        }
    }
}

/// Why the simulation loop stopped.
enum SimulationOutcome {
    /// The time or iteration budget ran out.
    BudgetExhausted,
    /// Selection hit a terminal dead end; every reachable line is explored.
    TreeExhausted,
    /// A first-ply move wins outright for the searching player.
    ForcedMove(Coord),
}

/// UCT search engine.
///
/// The budget is either wall-clock time (default 10 s) or, when set, a
/// fixed number of iterations; the iteration limit overrides the time
/// limit. With a fixed seed and an iteration limit, [`Uct::search`] is
/// fully deterministic.
pub struct Uct {
    time_limit: Duration,
    iteration_limit: Option<usize>,
    max_playout_depth: usize,
    exploration: f64,
    rng: fastrand::Rng,
}

impl Default for Uct {
    fn default() -> Self {
        Self::new()
    }
}

impl Uct {
    pub fn new() -> Self {
        Self {
            time_limit: Duration::from_secs_f64(DEFAULT_TIME_LIMIT_SECS),
            iteration_limit: None,
            max_playout_depth: DEFAULT_PLAYOUT_MAX_DEPTH,
            exploration: DEFAULT_EXPLORATION,
            rng: fastrand::Rng::new(),
        }
    }

    /// Set the wall-clock budget. Ignored while an iteration limit is set.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }

    /// Budget the search by iteration count instead of wall-clock time.
    pub fn with_iteration_limit(mut self, limit: usize) -> Self {
        self.iteration_limit = Some(limit);
        self
    }

    /// Cap the number of plies per random playout.
    pub fn with_max_playout_depth(mut self, depth: usize) -> Self {
        self.max_playout_depth = depth;
        self
    }

    /// Set the UCB1 exploration constant.
    pub fn with_exploration(mut self, exploration: f64) -> Self {
        self.exploration = exploration;
        self
    }

    /// Seed the internal random source for reproducible searches.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = fastrand::Rng::with_seed(seed);
        self
    }

    /// Choose a move for the player whose turn it is in `game`.
    ///
    /// The caller's game is never mutated; the search works on private
    /// clones throughout.
    ///
    /// # Panics
    /// Panics when no move can be produced: the game is already finished,
    /// the board has no legal moves, or the budget allows zero iterations.
    /// All three are caller misconfigurations.
    pub fn search(&mut self, game: &Game) -> Coord {
        let searching_for = game.to_move();
        debug!("searching a move for player {searching_for}");

        // The root represents the position before the searching player
        // moves, so its "mover" is the opponent.
        let mut root = UctNode::new(None, searching_for.other());

        match self.run_simulations(&mut root, game, searching_for) {
            SimulationOutcome::ForcedMove(mv) => {
                debug!("found an immediately winning move at ({}, {})", mv.0, mv.1);
                mv
            }
            SimulationOutcome::BudgetExhausted | SimulationOutcome::TreeExhausted => {
                robust_child(&root)
            }
        }
    }

    fn run_simulations(
        &mut self,
        root: &mut UctNode,
        game: &Game,
        searching_for: Player,
    ) -> SimulationOutcome {
        let start = Instant::now();
        let mut iterations = 0usize;

        // The budget is polled between cycles only, so a cycle always runs
        // to completion and the tree never holds half-propagated statistics.
        while !self.budget_exhausted(start, iterations) {
            let Some(path) = select(root, self.exploration) else {
                debug!("search tree exhausted after {iterations} iterations");
                return SimulationOutcome::TreeExhausted;
            };

            // Replay the selected line onto a private clone of the game.
            let mut leaf_game = game.clone();
            replay(root, &path, &mut leaf_game);

            let leaf = node_at_mut(root, &path);
            let (child_idx, mv) = self.expand(leaf, &mut leaf_game);

            if path.is_empty() && leaf_game.is_finished() && leaf_game.winner() == Some(searching_for)
            {
                return SimulationOutcome::ForcedMove(mv);
            }

            let winner = random_playout(&leaf_game, self.max_playout_depth, &mut self.rng);
            backpropagate(root, &path, child_idx, winner);

            iterations += 1;
            trace!("finished iteration {iterations}");
        }

        debug!(
            "budget exhausted after {iterations} iterations in {:.2?}",
            start.elapsed()
        );
        SimulationOutcome::BudgetExhausted
    }

    /// Add a child for one untried move of `leaf`, advancing `leaf_game`
    /// by that move. Returns the new child's index and its move.
    fn expand(&mut self, leaf: &mut UctNode, leaf_game: &mut Game) -> (usize, Coord) {
        assert!(!leaf_game.is_finished(), "cannot expand a finished game");
        let untried: Vec<Coord> = leaf_game
            .available_moves()
            .iter()
            .copied()
            .filter(|&c| !leaf.children.iter().any(|child| child.mv == Some(c)))
            .collect();
        assert!(!untried.is_empty(), "selection must stop at expandable nodes");

        let mv = untried[self.rng.usize(..untried.len())];
        let mover = leaf_game.to_move();
        leaf_game
            .play(mv.0, mv.1)
            .expect("untried moves come from the available set");

        let mut child = UctNode::new(Some(mv), mover);
        if leaf_game.is_finished() {
            child.expandable = false;
        }
        if untried.len() == 1 {
            leaf.expandable = false;
        }
        leaf.children.push(child);
        (leaf.children.len() - 1, mv)
    }

    fn budget_exhausted(&self, start: Instant, iterations: usize) -> bool {
        match self.iteration_limit {
            Some(limit) => iterations >= limit,
            None => start.elapsed() >= self.time_limit,
        }
    }
}

/// Descend from the root to an expandable node, always taking the child
/// with the highest UCB1 score. Returns the path of child indices, or
/// `None` when the greedy line ends in a terminal node with nothing left
/// to expand (the tree is exhausted along that line).
fn select(root: &UctNode, exploration: f64) -> Option<Vec<usize>> {
    let mut path = Vec::new();
    let mut node = root;

    while !node.expandable {
        let best = best_ucb_child(node, exploration)?;
        path.push(best);
        node = &node.children[best];
    }
    Some(path)
}

/// Index of the child maximizing UCB1, or `None` for a childless node.
///
/// An unvisited child wins outright: it must be played once before its
/// statistics mean anything, and the explicit branch keeps the formula
/// clear of a zero division.
fn best_ucb_child(node: &UctNode, exploration: f64) -> Option<usize> {
    let parent_visits = node.visits as f64;
    let mut best: Option<(usize, f64)> = None;

    for (idx, child) in node.children.iter().enumerate() {
        if child.visits == 0 {
            return Some(idx);
        }
        let n = child.visits as f64;
        let ucb = child.score / n + exploration * (parent_visits.ln() / n).sqrt();
        if best.is_none_or(|(_, top)| ucb > top) {
            best = Some((idx, ucb));
        }
    }
    best.map(|(idx, _)| idx)
}

/// Apply the moves stored along `path` to `game`.
fn replay(root: &UctNode, path: &[usize], game: &mut Game) {
    let mut node = root;
    for &idx in path {
        node = &node.children[idx];
        let (x, y) = node.mv.expect("non-root nodes always carry a move");
        game.play(x, y)
            .expect("tree moves replay cleanly onto a clone");
    }
}

/// Walk mutably to the node addressed by `path`.
fn node_at_mut<'a>(root: &'a mut UctNode, path: &[usize]) -> &'a mut UctNode {
    path.iter().fold(root, |node, &idx| &mut node.children[idx])
}

/// Fold a playout result into the root, every node along `path` and the
/// newly expanded child. The root is included so that first-ply UCB1 has a
/// parent visit total to work with.
fn backpropagate(root: &mut UctNode, path: &[usize], child_idx: usize, winner: Option<Player>) {
    let mut node = &mut *root;
    record(node, winner);
    for &idx in path {
        node = &mut node.children[idx];
        record(node, winner);
    }
    record(&mut node.children[child_idx], winner);
}

fn record(node: &mut UctNode, winner: Option<Player>) {
    node.visits += 1;
    node.score += match winner {
        Some(w) if w == node.player => 1.0,
        None => 0.5,
        Some(_) => -1.0,
    };
}

/// The most-visited root child. Ties go to the earliest-created child,
/// which keeps seeded runs deterministic.
fn robust_child(root: &UctNode) -> Coord {
    root.children
        .iter()
        .reduce(|top, child| if child.visits > top.visits { child } else { top })
        .expect("search produced no candidate move; was the game already finished?")
        .mv
        .expect("non-root nodes always carry a move")
}
