use rand::seq::IndexedRandom;
use rand::Rng;

use crate::lines::windows;
use crate::{Board, Piece, Window, CENTER_COL};

/// Score floor used by the single-ply picker before any column is scored.
const PICK_FLOOR: i64 = -10_000;

/// Scores one window from `piece`'s point of view.
pub fn evaluate_window(window: &Window, piece: Piece) -> i64 {
    let count = |target: Piece| window.iter().filter(|&&cell| cell == target).count();
    let mine = count(piece);
    let theirs = count(piece.opponent());
    let empty = count(Piece::Empty);
    match (mine, theirs, empty) {
        (4, _, _) => 100,
        (3, 0, 1) => 5,
        (2, 0, 2) => 2,
        (0, 3, 1) => -4,
        _ => 0,
    }
}

/// Static evaluation of a board for `piece`: every window plus a bonus per
/// piece in the center column.
pub fn score_position(board: &Board, piece: Piece) -> i64 {
    let center = 3 * board.count_in_column(CENTER_COL, piece) as i64;
    center
        + windows(board)
            .map(|window| evaluate_window(&window, piece))
            .sum::<i64>()
}

/// Greedy one-ply choice: the column whose drop scores best for `piece`.
/// The starting column is drawn at random from the legal ones; ties keep the
/// lowest column that beat it. `None` on a full board.
pub fn pick_best_move<R: Rng + ?Sized>(board: &Board, piece: Piece, rng: &mut R) -> Option<usize> {
    let legal = board.legal_moves();
    let fallback = *legal.choose(rng)?;
    Some(best_single_ply(board, piece, &legal, fallback))
}

pub(crate) fn best_single_ply(board: &Board, piece: Piece, legal: &[usize], fallback: usize) -> usize {
    let mut best_score = PICK_FLOOR;
    let mut best_col = fallback;
    for &col in legal {
        let mut child = *board;
        let row = child
            .next_open_row(col)
            .expect("legal column must have an open row");
        child.place(row, col, piece);
        let score = score_position(&child, piece);
        if score > best_score {
            best_score = score;
            best_col = col;
        }
    }
    best_col
}
