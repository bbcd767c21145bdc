//! Four-in-a-row engine with minimax and alpha-beta pruning.
//! The board is a small fixed grid (4 rows by 5 columns). The AI always plays
//! the maximizing side; the human is simulated as the minimizing side.
//! Boards are plain values: the search copies them per branch and never
//! touches the caller's board.
use thiserror::Error;

mod board;
mod eval;
mod lines;
mod search;

pub use board::{Board, Piece};
pub use eval::{evaluate_window, pick_best_move, score_position};
pub use lines::{has_four_in_a_row, is_terminal, windows, Window};
pub use search::{
    best_move, search, DecisionRecord, NoopObserver, SearchObserver, SearchResult, Side,
    TracingObserver,
};

pub const ROWS: usize = 4;
pub const COLS: usize = 5;
pub const WINDOW_LEN: usize = 4;
pub const CENTER_COL: usize = COLS / 2;

/// Depth used by the turn loop for every AI move.
pub const MAX_DEPTH: u8 = 5;
/// No game lasts longer than the number of cells, so deeper searches are pointless.
pub const MAX_DEPTH_LIMIT: u8 = (ROWS * COLS) as u8;

/// Value of a board where the AI has four in a row.
pub const WIN_SCORE: i64 = 100_000_000_000_000;
/// Value of a board where the player has four in a row.
pub const LOSS_SCORE: i64 = -10_000_000_000_000;
/// Search bound; `-INFINITY` is still representable.
pub const INFINITY: i64 = i64::MAX;

const LINE_SPAN: usize = WINDOW_LEN - 1;

/// Number of 4-cell windows across all four orientations.
pub const WINDOW_COUNT: usize = ROWS * (COLS - LINE_SPAN)
    + COLS * (ROWS - LINE_SPAN)
    + 2 * (ROWS - LINE_SPAN) * (COLS - LINE_SPAN);

/// Upper bound on `|score_position|`: every window at full win weight plus a
/// full center column.
pub const MAX_HEURISTIC: i64 = WINDOW_COUNT as i64 * 100 + 3 * ROWS as i64;

const _: () = assert!(MAX_HEURISTIC < -LOSS_SCORE);
const _: () = assert!(-LOSS_SCORE < WIN_SCORE);
const _: () = assert!(WIN_SCORE < INFINITY);

#[derive(Debug, Error)]
pub enum GameError {
    #[error("column {column} is out of bounds (0-{})", COLS - 1)]
    ColumnOutOfBounds { column: usize },
    #[error("column {column} is full")]
    ColumnFull { column: usize },
    #[error("depth {0} is out of range (1-{})", MAX_DEPTH_LIMIT)]
    DepthOutOfRange(u8),
    #[error("the game is already over")]
    GameOver,
    #[error("no legal moves remain")]
    NoMoves,
    #[error("invalid board diagram at row {row}: {reason}")]
    ParseBoard { row: usize, reason: String },
}
