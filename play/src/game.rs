use std::io::{BufRead, Write};

use anyhow::bail;
use four_in_a_row::{
    best_move, has_four_in_a_row, Board, DecisionRecord, GameError, Piece, TracingObserver, COLS,
};
use tracing::{debug, info};

use crate::config::PlayConfig;
use crate::turn_log::write_turn_log;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Turn {
    Human,
    Ai,
}

impl Turn {
    fn other(self) -> Turn {
        match self {
            Turn::Human => Turn::Ai,
            Turn::Ai => Turn::Human,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    HumanWon,
    AiWon,
    Draw,
}

/// Asks for the human's name, falling back to "Player" on a blank line.
pub fn prompt_name<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> anyhow::Result<String> {
    writeln!(output, "Input your name:")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    let name = line.trim();
    Ok(if name.is_empty() {
        "Player".to_string()
    } else {
        name.to_string()
    })
}

/// Human vs AI on one board, alternating turns until someone connects four or
/// the board fills up.
pub struct Game<R, W> {
    config: PlayConfig,
    name: String,
    board: Board,
    input: R,
    output: W,
    ai_turns: usize,
}

impl<R: BufRead, W: Write> Game<R, W> {
    pub fn new(config: PlayConfig, name: String, input: R, output: W) -> Self {
        Self {
            config,
            name,
            board: Board::new(),
            input,
            output,
            ai_turns: 0,
        }
    }

    /// Starts from `board` instead of an empty grid.
    #[cfg(test)]
    pub fn with_board(mut self, board: Board) -> Self {
        self.board = board;
        self
    }

    pub fn play(&mut self, first: Turn) -> anyhow::Result<Outcome> {
        write!(self.output, "{}", self.board)?;
        let mut turn = first;
        loop {
            let piece = match turn {
                Turn::Human => {
                    let column = self.read_human_move()?;
                    self.board.drop_piece(column, Piece::Player)?;
                    Piece::Player
                }
                Turn::Ai => {
                    writeln!(self.output, "AI's move:")?;
                    let column = self.choose_ai_move()?;
                    self.board.drop_piece(column, Piece::Ai)?;
                    Piece::Ai
                }
            };
            write!(self.output, "{}", self.board)?;

            if has_four_in_a_row(&self.board, piece) {
                let outcome = if piece == Piece::Ai {
                    writeln!(self.output, "AI has won")?;
                    Outcome::AiWon
                } else {
                    writeln!(self.output, "{} has won", self.name)?;
                    Outcome::HumanWon
                };
                return Ok(outcome);
            }
            if self.board.is_full() {
                writeln!(self.output, "It's a draw")?;
                return Ok(Outcome::Draw);
            }
            turn = turn.other();
        }
    }

    fn read_human_move(&mut self) -> anyhow::Result<usize> {
        loop {
            writeln!(self.output, "{}, make your move (0-{}):", self.name, COLS - 1)?;
            self.output.flush()?;
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                bail!("input closed before {} made a move", self.name);
            }
            let line = line.trim();
            match line.parse::<usize>() {
                Ok(column) if self.board.is_valid_move(column) => return Ok(column),
                Ok(column) if column >= COLS => {
                    writeln!(self.output, "{}", GameError::ColumnOutOfBounds { column })?
                }
                Ok(column) => writeln!(self.output, "{}", GameError::ColumnFull { column })?,
                Err(_) => writeln!(self.output, "{line:?} is not a column number")?,
            }
        }
    }

    fn choose_ai_move(&mut self) -> anyhow::Result<usize> {
        let mut observer = (TracingObserver, Vec::<DecisionRecord>::new());
        let result = best_move(&self.board, self.config.depth, &mut observer)?;
        let column = result.column.ok_or(GameError::NoMoves)?;
        info!(
            turn = self.ai_turns,
            column,
            value = result.value,
            "AI move chosen"
        );
        if let Some(dir) = &self.config.log_dir {
            let path = write_turn_log(dir, self.ai_turns, &observer.1)?;
            debug!(path = %path.display(), records = observer.1.len(), "turn diagnostics written");
        }
        self.ai_turns += 1;
        Ok(column)
    }
}
