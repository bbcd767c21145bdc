use once_cell::sync::Lazy;

use crate::{Board, Piece, COLS, ROWS, WINDOW_LEN};

/// Four consecutive cells sampled along one direction.
pub type Window = [Piece; WINDOW_LEN];

type Cells = [(usize, usize); WINDOW_LEN];

/// Coordinates of every window on the board, as `(row, col)` pairs.
static WINDOW_CELLS: Lazy<Vec<Cells>> = Lazy::new(generate_windows);

/// Iterates every 4-cell window of `board`: rows, then columns, then both
/// diagonals.
pub fn windows(board: &Board) -> impl Iterator<Item = Window> + '_ {
    WINDOW_CELLS
        .iter()
        .map(move |&cells| cells.map(|(row, col)| board.get(row, col)))
}

pub fn has_four_in_a_row(board: &Board, piece: Piece) -> bool {
    if piece == Piece::Empty {
        return false;
    }
    windows(board).any(|window| window.iter().all(|&cell| cell == piece))
}

/// Someone has won or the board is full.
pub fn is_terminal(board: &Board) -> bool {
    has_four_in_a_row(board, Piece::Player)
        || has_four_in_a_row(board, Piece::Ai)
        || board.legal_moves().is_empty()
}

fn generate_windows() -> Vec<Cells> {
    let span = WINDOW_LEN - 1;
    let mut cells = Vec::new();
    // Horizontal
    for row in 0..ROWS {
        for col in 0..COLS - span {
            cells.push(std::array::from_fn(|i| (row, col + i)));
        }
    }
    // Vertical
    for col in 0..COLS {
        for row in 0..ROWS - span {
            cells.push(std::array::from_fn(|i| (row + i, col)));
        }
    }
    // Diagonal /
    for row in 0..ROWS - span {
        for col in 0..COLS - span {
            cells.push(std::array::from_fn(|i| (row + i, col + i)));
        }
    }
    // Diagonal \
    for row in span..ROWS {
        for col in 0..COLS - span {
            cells.push(std::array::from_fn(|i| (row - i, col + i)));
        }
    }
    cells
}
