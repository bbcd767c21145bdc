use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{GameError, COLS, ROWS};

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Piece {
    #[default]
    Empty,
    Player,
    Ai,
}

impl Piece {
    /// The other side. `Empty` has no opponent and maps to itself.
    pub fn opponent(self) -> Piece {
        match self {
            Piece::Player => Piece::Ai,
            Piece::Ai => Piece::Player,
            Piece::Empty => Piece::Empty,
        }
    }

    fn symbol(self) -> char {
        match self {
            Piece::Empty => '.',
            Piece::Player => 'X',
            Piece::Ai => 'O',
        }
    }

    fn from_symbol(symbol: char) -> Option<Piece> {
        match symbol {
            '.' => Some(Piece::Empty),
            'X' | 'x' => Some(Piece::Player),
            'O' | 'o' => Some(Piece::Ai),
            _ => None,
        }
    }
}

/// Fixed `ROWS x COLS` grid. Row 0 is the bottom; columns fill upwards.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Board {
    cells: [[Piece; COLS]; ROWS],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from a diagram drawn top row first, using `.`, `X`
    /// (player) and `O` (AI). Whitespace inside a row is ignored. Gravity is
    /// not checked.
    pub fn from_rows(rows: &[&str]) -> Result<Self, GameError> {
        if rows.len() != ROWS {
            return Err(GameError::ParseBoard {
                row: rows.len(),
                reason: format!("expected {ROWS} rows, found {}", rows.len()),
            });
        }
        let mut board = Self::new();
        for (idx, line) in rows.iter().enumerate() {
            let symbols: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.len() != COLS {
                return Err(GameError::ParseBoard {
                    row: idx,
                    reason: format!("expected {COLS} cells, found {}", symbols.len()),
                });
            }
            let row = ROWS - 1 - idx;
            for (col, &symbol) in symbols.iter().enumerate() {
                let piece = Piece::from_symbol(symbol).ok_or_else(|| GameError::ParseBoard {
                    row: idx,
                    reason: format!("unknown cell {symbol:?}"),
                })?;
                board.place(row, col, piece);
            }
        }
        Ok(board)
    }

    pub fn get(&self, row: usize, col: usize) -> Piece {
        self.cells[row][col]
    }

    /// True iff `col` exists and its topmost cell is empty.
    pub fn is_valid_move(&self, col: usize) -> bool {
        col < COLS && self.cells[ROWS - 1][col] == Piece::Empty
    }

    /// Lowest empty row of `col`, or `None` when the column is full.
    pub fn next_open_row(&self, col: usize) -> Option<usize> {
        if col >= COLS {
            return None;
        }
        (0..ROWS).find(|&row| self.cells[row][col] == Piece::Empty)
    }

    /// Sets a cell without any validation.
    pub fn place(&mut self, row: usize, col: usize, piece: Piece) {
        self.cells[row][col] = piece;
    }

    /// Drops `piece` into `col`, returning the row it landed on.
    pub fn drop_piece(&mut self, col: usize, piece: Piece) -> Result<usize, GameError> {
        if col >= COLS {
            return Err(GameError::ColumnOutOfBounds { column: col });
        }
        let row = self
            .next_open_row(col)
            .ok_or(GameError::ColumnFull { column: col })?;
        self.place(row, col, piece);
        Ok(row)
    }

    /// Open columns in ascending order.
    pub fn legal_moves(&self) -> Vec<usize> {
        (0..COLS).filter(|&col| self.is_valid_move(col)).collect()
    }

    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| !self.is_valid_move(col))
    }

    pub fn count(&self, piece: Piece) -> usize {
        self.cells.iter().flatten().filter(|&&cell| cell == piece).count()
    }

    pub fn count_in_column(&self, col: usize, piece: Piece) -> usize {
        (0..ROWS).filter(|&row| self.cells[row][col] == piece).count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..ROWS).rev() {
            write!(f, "|")?;
            for col in 0..COLS {
                write!(f, " {}", self.cells[row][col].symbol())?;
            }
            writeln!(f, " |")?;
        }
        write!(f, " ")?;
        for col in 0..COLS {
            write!(f, " {col}")?;
        }
        writeln!(f)
    }
}
