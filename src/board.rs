//! Board state, move validation and win detection.
//!
//! The grid is a flat `Vec` indexed row by row. Alongside it the board keeps
//! the set of still-empty coordinates so that callers wanting a random or
//! enumerable legal move never rescan the whole grid; the set is updated on
//! every placement and removal from it is O(1) via a slot table.
//!
//! Win detection scans a bounded window of `2 * winning_count - 1` cells
//! centered on the new stone along each of the four line directions,
//! clipped to the board edges.

use std::fmt;

use crate::constants::{
    CIRCLE_GLYPH, CROSS_GLYPH, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_WINNING_COUNT,
    EMPTY_GLYPH,
};

/// A board coordinate as `(x, y)`, with `x` counting columns and `y` rows.
pub type Coord = (usize, usize);

/// Line directions checked for a win: horizontal, vertical and the two
/// diagonals. The opposite orientations are covered by scanning backwards
/// from the placed stone.
const DIRECTIONS: [(isize, isize); 4] = [
    (1, 0),  // Horizontal
    (0, 1),  // Vertical
    (1, 1),  // Diagonal, down-right
    (1, -1), // Diagonal, up-right
];

/// One of the two players.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Player {
    Cross,
    Circle,
}

impl Player {
    /// The opposing player.
    #[inline]
    pub fn other(self) -> Self {
        match self {
            Player::Cross => Player::Circle,
            Player::Circle => Player::Cross,
        }
    }

    /// Character used when rendering this player's stones.
    pub fn glyph(self) -> char {
        match self {
            Player::Cross => CROSS_GLYPH,
            Player::Circle => CIRCLE_GLYPH,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// A stone placement: a coordinate plus the player it is attributed to.
///
/// A `Move` does not validate its own bounds; [`Board::place_move`] does.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Move {
    pub x: usize,
    pub y: usize,
    pub player: Player,
}

impl Move {
    pub fn new(x: usize, y: usize, player: Player) -> Self {
        Self { x, y, player }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) by {}", self.x, self.y, self.player)
    }
}

/// Board dimensions and the run length required to win.
///
/// A `winning_count` larger than both dimensions is accepted; such a game
/// can only end in a draw.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BoardSpec {
    pub width: usize,
    pub height: usize,
    pub winning_count: usize,
}

impl BoardSpec {
    pub fn new(width: usize, height: usize, winning_count: usize) -> Self {
        Self {
            width,
            height,
            winning_count,
        }
    }
}

impl Default for BoardSpec {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_WIDTH, DEFAULT_BOARD_HEIGHT, DEFAULT_WINNING_COUNT)
    }
}

/// Errors reported by board operations. All are recoverable: a failed
/// operation leaves the board untouched.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// The coordinate lies outside the grid.
    #[error("move ({x}, {y}) is outside the {width}x{height} board")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    /// The target cell already holds a stone.
    #[error("cell ({x}, {y}) is already occupied by {occupant}")]
    Occupied { x: usize, y: usize, occupant: Player },
    /// A field query hit a cell with no stone on it.
    #[error("cell ({x}, {y}) is empty")]
    EmptyCell { x: usize, y: usize },
}

/// The playing grid plus its available-move bookkeeping.
///
/// Cloning a board deep-copies both buffers, so a clone handed to a search
/// rollout shares no mutable state with the original.
#[derive(Clone)]
pub struct Board {
    spec: BoardSpec,
    cells: Vec<Option<Player>>,
    available: Vec<Coord>,
    // cell index -> position in `available`; only meaningful while the cell is empty
    available_slot: Vec<usize>,
}

impl Board {
    pub fn new(spec: BoardSpec) -> Self {
        let cell_count = spec.width * spec.height;
        let mut available = Vec::with_capacity(cell_count);
        let mut available_slot = vec![0; cell_count];
        for y in 0..spec.height {
            for x in 0..spec.width {
                available_slot[y * spec.width + x] = available.len();
                available.push((x, y));
            }
        }
        Self {
            spec,
            cells: vec![None; cell_count],
            available,
            available_slot,
        }
    }

    #[inline]
    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.spec.width + x
    }

    #[inline]
    fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.spec.width && y < self.spec.height
    }

    pub fn width(&self) -> usize {
        self.spec.width
    }

    pub fn height(&self) -> usize {
        self.spec.height
    }

    pub fn winning_count(&self) -> usize {
        self.spec.winning_count
    }

    pub fn spec(&self) -> BoardSpec {
        self.spec
    }

    /// Stone at `(x, y)`, or `None` for an empty or out-of-range cell.
    pub fn get(&self, x: usize, y: usize) -> Option<Player> {
        if !self.in_bounds(x, y) {
            return None;
        }
        self.cells[self.idx(x, y)]
    }

    /// Occupant of `(x, y)`.
    ///
    /// # Errors
    /// [`BoardError::OutOfBounds`] beyond the grid, [`BoardError::EmptyCell`]
    /// for an in-range cell with no stone.
    pub fn get_field(&self, x: usize, y: usize) -> Result<Player, BoardError> {
        if !self.in_bounds(x, y) {
            return Err(BoardError::OutOfBounds {
                x,
                y,
                width: self.spec.width,
                height: self.spec.height,
            });
        }
        self.cells[self.idx(x, y)].ok_or(BoardError::EmptyCell { x, y })
    }

    /// Place a stone. Validation happens strictly before any mutation.
    ///
    /// # Errors
    /// [`BoardError::OutOfBounds`] or [`BoardError::Occupied`]; the grid and
    /// the available set are unchanged on error.
    pub fn place_move(&mut self, mv: Move) -> Result<(), BoardError> {
        if !self.in_bounds(mv.x, mv.y) {
            return Err(BoardError::OutOfBounds {
                x: mv.x,
                y: mv.y,
                width: self.spec.width,
                height: self.spec.height,
            });
        }
        let idx = self.idx(mv.x, mv.y);
        if let Some(occupant) = self.cells[idx] {
            return Err(BoardError::Occupied {
                x: mv.x,
                y: mv.y,
                occupant,
            });
        }
        self.cells[idx] = Some(mv.player);
        self.remove_available(idx);
        Ok(())
    }

    fn remove_available(&mut self, cell_idx: usize) {
        let slot = self.available_slot[cell_idx];
        self.available.swap_remove(slot);
        // The entry swapped into `slot` (if any) needs its slot index fixed.
        if let Some(&(mx, my)) = self.available.get(slot) {
            let moved_idx = self.idx(mx, my);
            self.available_slot[moved_idx] = slot;
        }
    }

    /// Coordinates of all still-empty cells, in no particular order.
    pub fn available_moves(&self) -> &[Coord] {
        &self.available
    }

    /// Number of stones placed so far.
    pub fn move_count(&self) -> usize {
        self.cells.len() - self.available.len()
    }

    /// Whether the stone described by `mv` anchors a run of `winning_count`
    /// same-player stones on any of the four line directions through it.
    ///
    /// Assumes the move has already been placed.
    pub fn is_winning_move(&self, mv: Move) -> bool {
        DIRECTIONS
            .iter()
            .any(|&(dx, dy)| self.line_through(mv, dx, dy))
    }

    /// Scan the window of up to `2 * winning_count - 1` cells centered on
    /// `mv` along direction `(dx, dy)`, counting consecutive stones of the
    /// moving player. The window is clipped so no index leaves the grid.
    fn line_through(&self, mv: Move, dx: isize, dy: isize) -> bool {
        let reach = self.spec.winning_count - 1;
        let back = Self::axis_steps(mv.x, -dx, self.spec.width)
            .min(Self::axis_steps(mv.y, -dy, self.spec.height))
            .min(reach);
        let forward = Self::axis_steps(mv.x, dx, self.spec.width)
            .min(Self::axis_steps(mv.y, dy, self.spec.height))
            .min(reach);

        let start_x = mv.x as isize - back as isize * dx;
        let start_y = mv.y as isize - back as isize * dy;

        let mut run = 0;
        for i in 0..=(back + forward) as isize {
            let x = (start_x + i * dx) as usize;
            let y = (start_y + i * dy) as usize;
            if self.cells[self.idx(x, y)] == Some(mv.player) {
                run += 1;
                if run == self.spec.winning_count {
                    return true;
                }
            } else {
                run = 0;
            }
        }
        false
    }

    /// How many steps coordinate `c` can move by `delta` while staying in
    /// `[0, len)`.
    #[inline]
    fn axis_steps(c: usize, delta: isize, len: usize) -> usize {
        match delta {
            0 => usize::MAX,
            d if d > 0 => len - 1 - c,
            _ => c,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.spec.height {
            for x in 0..self.spec.width {
                let ch = match self.get(x, y) {
                    Some(player) => player.glyph(),
                    None => EMPTY_GLYPH,
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_board() -> Board {
        Board::new(BoardSpec::default())
    }

    fn place_all(board: &mut Board, coords: &[(usize, usize)], player: Player) {
        for &(x, y) in coords {
            board.place_move(Move::new(x, y, player)).unwrap();
        }
    }

    #[test]
    fn test_placing_circle_move() {
        let mut board = default_board();
        board.place_move(Move::new(0, 0, Player::Circle)).unwrap();
        assert_eq!(board.get_field(0, 0), Ok(Player::Circle));
    }

    #[test]
    fn test_placing_cross_move() {
        let mut board = default_board();
        board.place_move(Move::new(0, 0, Player::Cross)).unwrap();
        assert_eq!(board.get_field(0, 0), Ok(Player::Cross));
    }

    #[test]
    fn test_placing_on_occupied_cell() {
        let mut board = default_board();
        board.place_move(Move::new(0, 0, Player::Cross)).unwrap();

        let result = board.place_move(Move::new(0, 0, Player::Circle));
        assert_eq!(
            result,
            Err(BoardError::Occupied {
                x: 0,
                y: 0,
                occupant: Player::Cross
            })
        );
        // The grid and the available set are untouched.
        assert_eq!(board.get_field(0, 0), Ok(Player::Cross));
        assert_eq!(board.move_count(), 1);
    }

    #[test]
    fn test_placing_move_outside_board() {
        let mut board = default_board();
        let (w, h) = (board.width(), board.height());

        let result = board.place_move(Move::new(w, h, Player::Circle));
        assert_eq!(
            result,
            Err(BoardError::OutOfBounds {
                x: w,
                y: h,
                width: w,
                height: h
            })
        );
        assert_eq!(board.move_count(), 0);
    }

    #[test]
    fn test_get_field_on_empty_cell() {
        let board = default_board();
        assert_eq!(board.get_field(3, 3), Err(BoardError::EmptyCell { x: 3, y: 3 }));
    }

    #[test]
    fn test_available_set_tracks_placements() {
        let mut board = default_board();
        let total = board.width() * board.height();
        assert_eq!(board.available_moves().len(), total);

        board.place_move(Move::new(4, 7, Player::Circle)).unwrap();
        assert_eq!(board.available_moves().len(), total - 1);
        assert!(!board.available_moves().contains(&(4, 7)));
        assert_eq!(board.available_moves().len() + board.move_count(), total);
    }

    #[test]
    fn test_is_winning_move_horizontal() {
        let mut board = default_board();
        place_all(&mut board, &[(0, 0), (1, 0), (2, 0), (3, 0)], Player::Circle);

        let winning = Move::new(4, 0, Player::Circle);
        board.place_move(winning).unwrap();
        assert!(board.is_winning_move(winning));
    }

    #[test]
    fn test_is_winning_move_vertical() {
        let mut board = default_board();
        place_all(&mut board, &[(0, 0), (0, 1), (0, 2), (0, 3)], Player::Circle);

        let winning = Move::new(0, 4, Player::Circle);
        board.place_move(winning).unwrap();
        assert!(board.is_winning_move(winning));
    }

    #[test]
    fn test_is_winning_move_diagonal_trivial() {
        let mut board = default_board();
        place_all(&mut board, &[(0, 0), (1, 1), (2, 2), (3, 3)], Player::Circle);

        let winning = Move::new(4, 4, Player::Circle);
        board.place_move(winning).unwrap();
        assert!(board.is_winning_move(winning));
    }

    #[test]
    fn test_is_winning_move_diagonal_near_edge() {
        // Up-right diagonal ending in the board corner region.
        let mut board = default_board();
        place_all(&mut board, &[(5, 5), (7, 3), (8, 2), (9, 1)], Player::Circle);

        let winning = Move::new(6, 4, Player::Circle);
        board.place_move(winning).unwrap();
        assert!(board.is_winning_move(winning));
    }

    #[test]
    fn test_is_winning_move_horizontal_interior() {
        // Fill 0,1 and 3,4 first; the win is completed from the inside.
        let mut board = default_board();
        place_all(&mut board, &[(0, 0), (1, 0), (3, 0), (4, 0)], Player::Circle);

        let winning = Move::new(2, 0, Player::Circle);
        board.place_move(winning).unwrap();
        assert!(board.is_winning_move(winning));
    }

    #[test]
    fn test_is_winning_move_vertical_interior() {
        let mut board = default_board();
        place_all(&mut board, &[(0, 0), (0, 1), (0, 3), (0, 4)], Player::Circle);

        let winning = Move::new(0, 2, Player::Circle);
        board.place_move(winning).unwrap();
        assert!(board.is_winning_move(winning));
    }

    #[test]
    fn test_is_winning_move_diagonal_interior() {
        let mut board = default_board();
        place_all(&mut board, &[(0, 0), (1, 1), (3, 3), (4, 4)], Player::Circle);

        let winning = Move::new(2, 2, Player::Circle);
        board.place_move(winning).unwrap();
        assert!(board.is_winning_move(winning));
    }

    #[test]
    fn test_broken_run_is_not_a_win() {
        // Opponent stone inside the window resets the running count.
        let mut board = default_board();
        place_all(&mut board, &[(0, 0), (1, 0), (3, 0), (4, 0)], Player::Circle);
        board.place_move(Move::new(2, 0, Player::Cross)).unwrap();

        let last = Move::new(5, 0, Player::Circle);
        board.place_move(last).unwrap();
        assert!(!board.is_winning_move(last));
    }

    #[test]
    fn test_is_not_winning_move() {
        let mut board = default_board();
        let mv = Move::new(2, 2, Player::Circle);
        board.place_move(mv).unwrap();
        assert!(!board.is_winning_move(mv));
    }

    #[test]
    fn test_anti_diagonal_win_on_small_board() {
        let mut board = Board::new(BoardSpec::new(3, 3, 3));
        place_all(&mut board, &[(2, 0), (1, 1)], Player::Circle);

        let winning = Move::new(0, 2, Player::Circle);
        board.place_move(winning).unwrap();
        assert!(board.is_winning_move(winning));
    }

    #[test]
    fn test_winning_count_larger_than_board() {
        let mut board = Board::new(BoardSpec::new(3, 3, 5));
        place_all(&mut board, &[(0, 0), (1, 1)], Player::Circle);

        let mv = Move::new(2, 2, Player::Circle);
        board.place_move(mv).unwrap();
        assert!(!board.is_winning_move(mv));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut board = default_board();
        board.place_move(Move::new(0, 0, Player::Circle)).unwrap();

        let mut clone = board.clone();
        clone.place_move(Move::new(1, 1, Player::Cross)).unwrap();

        assert_eq!(board.get(1, 1), None);
        assert_eq!(board.move_count(), 1);
        assert_eq!(clone.move_count(), 2);
        assert!(board.available_moves().contains(&(1, 1)));
    }

    #[test]
    fn test_move_display() {
        let mv = Move::new(1, 2, Player::Cross);
        assert_eq!(mv.to_string(), "(1, 2) by X");
    }

    #[test]
    fn test_render() {
        let mut board = Board::new(BoardSpec::new(3, 3, 3));
        board.place_move(Move::new(0, 0, Player::Cross)).unwrap();
        board.place_move(Move::new(1, 1, Player::Circle)).unwrap();

        let rendered = board.to_string();
        assert_eq!(rendered, "X _ _ \n_ O _ \n_ _ _ \n");
    }
}
