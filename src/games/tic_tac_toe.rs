//! Tic-tac-toe on an N×N board
//!
//! X is stored as `1`, O as `-1` and an empty cell as `0`, so a completed line
//! is one whose cells sum to `±N`.

use std::fmt;

use crate::{
    game_state::{Action, GameState, Outcome, Player},
    MCTSError, Result,
};

/// One of the two sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// Cell value written for this mark
    pub fn value(self) -> i8 {
        match self {
            Mark::X => 1,
            Mark::O => -1,
        }
    }

    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    fn from_value(value: i8) -> Option<Mark> {
        match value {
            1 => Some(Mark::X),
            -1 => Some(Mark::O),
            _ => None,
        }
    }
}

impl Player for Mark {}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

/// Placing `mark` at (`row`, `col`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TicTacToeMove {
    pub row: usize,
    pub col: usize,
    pub mark: Mark,
}

impl TicTacToeMove {
    pub fn new(row: usize, col: usize, mark: Mark) -> Self {
        TicTacToeMove { row, col, mark }
    }
}

impl Action for TicTacToeMove {}

impl fmt::Display for TicTacToeMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at ({}, {})", self.mark, self.row, self.col)
    }
}

/// An immutable tic-tac-toe position
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TicTacToe {
    cells: Vec<i8>,
    size: usize,
    next_to_move: Mark,
}

impl Default for TicTacToe {
    /// The classic empty 3×3 board, X to move
    fn default() -> Self {
        TicTacToe {
            cells: vec![0; 9],
            size: 3,
            next_to_move: Mark::X,
        }
    }
}

impl TicTacToe {
    /// An empty `size`×`size` board with X to move
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(MCTSError::MalformedState(
                "board must have at least one cell".to_string(),
            ));
        }
        Ok(TicTacToe {
            cells: vec![0; size * size],
            size,
            next_to_move: Mark::X,
        })
    }

    /// Builds a position from rows of `1` (X), `-1` (O) and `0` (empty)
    ///
    /// # Errors
    ///
    /// [`MCTSError::MalformedState`] if the board is empty, not square, or
    /// holds any other value.
    pub fn from_rows(rows: Vec<Vec<i8>>, next_to_move: Mark) -> Result<Self> {
        let size = rows.len();
        if size == 0 {
            return Err(MCTSError::MalformedState(
                "please play on a 2D square board, got no rows".to_string(),
            ));
        }

        let mut cells = Vec::with_capacity(size * size);
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(MCTSError::MalformedState(format!(
                    "please play on a 2D square board, row {} has {} cells, expected {}",
                    index,
                    row.len(),
                    size
                )));
            }
            if let Some(bad) = row.iter().find(|value| !(-1..=1).contains(*value)) {
                return Err(MCTSError::MalformedState(format!(
                    "cell value {} in row {} is not one of -1, 0, 1",
                    bad, index
                )));
            }
            cells.extend(row);
        }

        Ok(TicTacToe {
            cells,
            size,
            next_to_move,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn next_to_move(&self) -> Mark {
        self.next_to_move
    }

    /// The mark at (`row`, `col`), `None` if empty or off the board
    pub fn cell(&self, row: usize, col: usize) -> Option<Mark> {
        if row >= self.size || col >= self.size {
            return None;
        }
        Mark::from_value(self.cells[row * self.size + col])
    }

    /// The board as rows of `1`, `-1` and `0`
    pub fn rows(&self) -> Vec<Vec<i8>> {
        self.cells.chunks(self.size).map(<[i8]>::to_vec).collect()
    }

    /// Returns true if `action` can be played in this position
    pub fn is_move_legal(&self, action: &TicTacToeMove) -> bool {
        action.mark == self.next_to_move
            && action.row < self.size
            && action.col < self.size
            && self.cells[action.row * self.size + action.col] == 0
            && self.outcome().is_none()
    }

    /// Parses human input such as `"1,2"` or `"1 2"` into a move for the side
    /// to move
    ///
    /// # Errors
    ///
    /// [`MCTSError::IllegalMove`] if the input is not two coordinates or the
    /// move is not legal here.
    pub fn parse_move(&self, input: &str) -> Result<TicTacToeMove> {
        let coords = input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(|part| part.parse::<usize>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| MCTSError::IllegalMove(format!("could not parse {:?}: {}", input, e)))?;

        let [row, col] = coords[..] else {
            return Err(MCTSError::IllegalMove(format!(
                "expected two coordinates, got {:?}",
                input
            )));
        };

        let action = TicTacToeMove::new(row, col, self.next_to_move);
        if !self.is_move_legal(&action) {
            return Err(MCTSError::IllegalMove(format!("{} is not legal", action)));
        }
        Ok(action)
    }

    fn line_sums(&self) -> Vec<i32> {
        let n = self.size;
        let at = |row: usize, col: usize| self.cells[row * n + col] as i32;

        let mut sums = Vec::with_capacity(2 * n + 2);
        for i in 0..n {
            sums.push((0..n).map(|col| at(i, col)).sum());
            sums.push((0..n).map(|row| at(row, i)).sum());
        }
        sums.push((0..n).map(|i| at(i, i)).sum());
        sums.push((0..n).map(|i| at(i, n - 1 - i)).sum());
        sums
    }
}

impl GameState for TicTacToe {
    type Action = TicTacToeMove;
    type Player = Mark;

    fn get_legal_actions(&self) -> Vec<TicTacToeMove> {
        if self.outcome().is_some() {
            return Vec::new();
        }

        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &value)| value == 0)
            .map(|(index, _)| {
                TicTacToeMove::new(index / self.size, index % self.size, self.next_to_move)
            })
            .collect()
    }

    fn apply_action(&self, action: &TicTacToeMove) -> Result<Self> {
        if !self.is_move_legal(action) {
            return Err(MCTSError::IllegalMove(format!(
                "{} on board\n{}",
                action, self
            )));
        }

        let mut next = self.clone();
        next.cells[action.row * self.size + action.col] = action.mark.value();
        next.next_to_move = self.next_to_move.opponent();
        Ok(next)
    }

    fn outcome(&self) -> Option<Outcome<Mark>> {
        let n = self.size as i32;
        let sums = self.line_sums();

        // X is checked first, matching boards where both sides have a line
        if sums.contains(&n) {
            Some(Outcome::Win(Mark::X))
        } else if sums.contains(&-n) {
            Some(Outcome::Win(Mark::O))
        } else if self.cells.iter().all(|&value| value != 0) {
            Some(Outcome::Draw)
        } else {
            None
        }
    }

    fn get_current_player(&self) -> Mark {
        self.next_to_move
    }
}

impl fmt::Display for TicTacToe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for col in 0..self.size {
            write!(f, " {}", col)?;
        }
        writeln!(f)?;

        for row in 0..self.size {
            write!(f, "{:>2}", row)?;
            for col in 0..self.size {
                let symbol = match self.cell(row, col) {
                    Some(mark) => mark.to_string(),
                    None => "_".to_string(),
                };
                write!(f, " {}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
