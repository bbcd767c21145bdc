//! Depth-limited minimax with alpha-beta pruning.
//!
//! The AI is the maximizing side and the human the minimizing side. Every
//! branch works on its own copy of the board. Columns are scanned in
//! ascending order and only a strictly better value replaces the current
//! choice, so the lowest column wins ties and the result is deterministic.
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::eval::{best_single_ply, score_position};
use crate::lines::{has_four_in_a_row, is_terminal};
use crate::{Board, GameError, Piece, INFINITY, LOSS_SCORE, MAX_DEPTH_LIMIT, WIN_SCORE};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Max,
    Min,
}

/// One interior node's decision, reported after its column scan ends.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRecord {
    /// Remaining depth at the node.
    pub depth: u8,
    pub side: Side,
    pub column: usize,
    pub value: i64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// `None` at leaves.
    pub column: Option<usize>,
    pub value: i64,
}

/// Receives a record from every interior node. Observers only watch; they
/// cannot steer the search.
pub trait SearchObserver {
    fn record(&mut self, record: &DecisionRecord);
}

#[derive(Copy, Clone, Debug, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {
    fn record(&mut self, _record: &DecisionRecord) {}
}

/// Emits each record as a TRACE event.
#[derive(Copy, Clone, Debug, Default)]
pub struct TracingObserver;

impl SearchObserver for TracingObserver {
    fn record(&mut self, record: &DecisionRecord) {
        trace!(
            depth = record.depth,
            side = ?record.side,
            column = record.column,
            value = record.value,
            "search decision"
        );
    }
}

impl SearchObserver for Vec<DecisionRecord> {
    fn record(&mut self, record: &DecisionRecord) {
        self.push(*record);
    }
}

impl<A: SearchObserver, B: SearchObserver> SearchObserver for (A, B) {
    fn record(&mut self, record: &DecisionRecord) {
        self.0.record(record);
        self.1.record(record);
    }
}

impl<T: SearchObserver + ?Sized> SearchObserver for &mut T {
    fn record(&mut self, record: &DecisionRecord) {
        (**self).record(record);
    }
}

/// Chooses the AI's move on `board`, searching `depth` plies.
pub fn best_move<O: SearchObserver + ?Sized>(
    board: &Board,
    depth: u8,
    observer: &mut O,
) -> Result<SearchResult, GameError> {
    if !(1..=MAX_DEPTH_LIMIT).contains(&depth) {
        return Err(GameError::DepthOutOfRange(depth));
    }
    if is_terminal(board) {
        return Err(GameError::GameOver);
    }
    let result = search(board, depth, -INFINITY, INFINITY, true, observer);
    match result.column {
        Some(_) => Ok(result),
        None => Err(GameError::NoMoves),
    }
}

/// Minimax over `board` with the `[alpha, beta]` window. Leaves (depth
/// exhausted or game over) return no column.
pub fn search<O: SearchObserver + ?Sized>(
    board: &Board,
    depth: u8,
    mut alpha: i64,
    mut beta: i64,
    maximizing: bool,
    observer: &mut O,
) -> SearchResult {
    if depth == 0 || is_terminal(board) {
        return SearchResult {
            column: None,
            value: leaf_value(board),
        };
    }

    let legal = board.legal_moves();
    let first = *legal
        .first()
        .expect("a non-terminal board has a legal move");
    let mut column = best_single_ply(board, Piece::Ai, &legal, first);

    let (piece, side) = if maximizing {
        (Piece::Ai, Side::Max)
    } else {
        (Piece::Player, Side::Min)
    };
    let mut value = if maximizing { -INFINITY } else { INFINITY };

    for col in legal {
        let mut child = *board;
        let row = child
            .next_open_row(col)
            .expect("legal column must have an open row");
        child.place(row, col, piece);
        let score = search(&child, depth - 1, alpha, beta, !maximizing, observer).value;
        if maximizing {
            if score > value {
                value = score;
                column = col;
            }
            alpha = alpha.max(value);
        } else {
            if score < value {
                value = score;
                column = col;
            }
            beta = beta.min(value);
        }
        if alpha >= beta {
            break;
        }
    }

    observer.record(&DecisionRecord {
        depth,
        side,
        column,
        value,
    });
    SearchResult {
        column: Some(column),
        value,
    }
}

fn leaf_value(board: &Board) -> i64 {
    if has_four_in_a_row(board, Piece::Ai) {
        WIN_SCORE
    } else if has_four_in_a_row(board, Piece::Player) {
        LOSS_SCORE
    } else if board.is_full() {
        0
    } else {
        score_position(board, Piece::Ai)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MAX_DEPTH;

    fn board(rows: [&str; 4]) -> Board {
        Board::from_rows(&rows).unwrap()
    }

    fn root(board: &Board, depth: u8) -> SearchResult {
        search(board, depth, -INFINITY, INFINITY, true, &mut NoopObserver)
    }

    #[test]
    fn depth_zero_returns_heuristic() {
        let b = board([".....", ".....", "XX...", "OOO.."]);
        assert_eq!(
            root(&b, 0),
            SearchResult {
                column: None,
                value: 10
            }
        );
    }

    #[test]
    fn leaf_values_for_finished_games() {
        let won = board([".....", ".....", "XXX..", "OOOO."]);
        let lost = board([".....", "O....", "OO...", "XXXX."]);
        let drawn = board(["XXOOX", "OOXXO", "XXOOX", "OOXXO"]);
        for depth in [0, 1, MAX_DEPTH] {
            assert_eq!(root(&won, depth), SearchResult { column: None, value: WIN_SCORE });
            assert_eq!(root(&lost, depth), SearchResult { column: None, value: LOSS_SCORE });
            assert_eq!(root(&drawn, depth), SearchResult { column: None, value: 0 });
        }
    }

    #[test]
    fn empty_board_depth_one_takes_center() {
        let result = root(&Board::new(), 1);
        assert_eq!(result.column, Some(2));
        assert_eq!(result.value, 3);
    }

    #[test]
    fn takes_immediate_win() {
        let b = board([".....", ".....", "XXX..", "OOO.."]);
        let result = root(&b, 3);
        assert_eq!(result.column, Some(3));
        assert_eq!(result.value, WIN_SCORE);
    }

    #[test]
    fn minimizer_takes_its_win() {
        let b = board([".....", ".....", "OO...", "XXX.."]);
        let result = search(&b, 1, -INFINITY, INFINITY, false, &mut NoopObserver);
        assert_eq!(result.column, Some(3));
        assert_eq!(result.value, LOSS_SCORE);
    }

    #[test]
    fn root_record_is_last() {
        let mut records: Vec<DecisionRecord> = Vec::new();
        let result = search(&Board::new(), 3, -INFINITY, INFINITY, true, &mut records);
        let last = records.last().copied().unwrap();
        assert_eq!(last.depth, 3);
        assert_eq!(last.side, Side::Max);
        assert_eq!(Some(last.column), result.column);
        assert_eq!(last.value, result.value);
        assert!(records.iter().all(|r| r.depth >= 1 && r.depth <= 3));
        assert!(records
            .iter()
            .all(|r| (r.side == Side::Max) == (r.depth % 2 == 1)));
    }

    #[test]
    fn observers_do_not_change_the_result() {
        let b = board([".....", ".....", "..X..", "O.XO."]);
        let quiet = root(&b, 4);
        let mut both = (TracingObserver, Vec::<DecisionRecord>::new());
        let watched = search(&b, 4, -INFINITY, INFINITY, true, &mut both);
        assert_eq!(quiet, watched);
        assert!(!both.1.is_empty());
    }

    #[test]
    fn best_move_validates_input() {
        assert!(matches!(
            best_move(&Board::new(), 0, &mut NoopObserver),
            Err(GameError::DepthOutOfRange(0))
        ));
        assert!(matches!(
            best_move(&Board::new(), MAX_DEPTH_LIMIT + 1, &mut NoopObserver),
            Err(GameError::DepthOutOfRange(21))
        ));
        let won = board([".....", ".....", "XXX..", "OOOO."]);
        assert!(matches!(
            best_move(&won, MAX_DEPTH, &mut NoopObserver),
            Err(GameError::GameOver)
        ));
    }

    #[test]
    fn best_move_returns_a_legal_column() {
        let b = board(["X.O..", "XOO..", "OXX.X", "XOOXO"]);
        let result = best_move(&b, MAX_DEPTH, &mut NoopObserver).unwrap();
        let column = result.column.unwrap();
        assert!(b.is_valid_move(column));
    }

    #[test]
    fn records_serialize_with_side_names() {
        let record = DecisionRecord {
            depth: 5,
            side: Side::Max,
            column: 2,
            value: 7,
        };
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"depth":5,"side":"MAX","column":2,"value":7}"#
        );
    }
}
