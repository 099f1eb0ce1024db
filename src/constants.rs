//! Default parameters for boards and the search engine.
//!
//! Board geometry is a runtime value (see [`crate::board::BoardSpec`]);
//! the constants here only provide the defaults a plain `gomoku-rust`
//! invocation uses: a 10x10 board where five aligned stones win, and a
//! 10-second search budget for the computer player.

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board width.
pub const DEFAULT_BOARD_WIDTH: usize = 10;

/// Default board height.
pub const DEFAULT_BOARD_HEIGHT: usize = 10;

/// Default number of aligned stones required to win.
pub const DEFAULT_WINNING_COUNT: usize = 5;

// =============================================================================
// Search Engine Parameters
// =============================================================================

/// Default wall-clock search budget, in seconds.
pub const DEFAULT_TIME_LIMIT_SECS: f64 = 10.0;

/// Default maximum number of plies in a single random playout.
///
/// Bounds playouts on boards where the draw condition would otherwise take
/// arbitrarily long to reach; a capped playout scores as a draw.
pub const DEFAULT_PLAYOUT_MAX_DEPTH: usize = 100;

/// Default UCB1 exploration constant.
pub const DEFAULT_EXPLORATION: f64 = 1.4;

// =============================================================================
// Rendering Glyphs
// =============================================================================

/// Glyph for a cross stone.
pub const CROSS_GLYPH: char = 'X';

/// Glyph for a circle stone.
pub const CIRCLE_GLYPH: char = 'O';

/// Glyph for an empty cell.
pub const EMPTY_GLYPH: char = '_';
