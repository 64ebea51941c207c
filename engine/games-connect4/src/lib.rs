//! Connect 4 rules for the MCTS engine
//!
//! Connect 4 is a two-player connection game where players drop colored discs
//! into a 7-column, 6-row vertically suspended grid. The objective is to be
//! the first to form a horizontal, vertical, or diagonal line of four discs.
//!
//! # Board Layout
//!
//! The board is stored in row-major order, with row 0 at the bottom:
//! ```text
//! Row 5: [35][36][37][38][39][40][41]  <- Top
//! Row 4: [28][29][30][31][32][33][34]
//! Row 3: [21][22][23][24][25][26][27]
//! Row 2: [14][15][16][17][18][19][20]
//! Row 1: [ 7][ 8][ 9][10][11][12][13]
//! Row 0: [ 0][ 1][ 2][ 3][ 4][ 5][ 6]  <- Bottom
//!         Col 0  1  2  3  4  5  6
//! ```
//!
//! # Usage
//!
//! ```rust
//! use games_connect4::{Board, Connect4Rules, Disc};
//! use mcts::{run_search, SearchConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let board = Board::new().drop_disc(3, Disc::Red).unwrap();
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let config = SearchConfig::default().with_iterations(100);
//!
//! let decision = run_search(&Connect4Rules, board, Disc::Yellow, config, &mut rng);
//! assert_eq!(decision.board.moves_played(), 2);
//! ```

use std::fmt;
use std::str::FromStr;

use mcts::GameRules;
use thiserror::Error;

/// Board dimensions
pub const COLS: usize = 7;
pub const ROWS: usize = 6;
pub const BOARD_SIZE: usize = COLS * ROWS; // 42

/// Errors from dropping a disc.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("Column {column} is out of range (expected 0-{})", COLS - 1)]
    ColumnOutOfRange { column: usize },

    #[error("Column {column} is full")]
    ColumnFull { column: usize },
}

/// Error from parsing a disc name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown disc: {0} (expected \"red\" or \"yellow\")")]
pub struct ParseDiscError(pub String);

/// A player's disc. Red moves first in a standard game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Disc {
    Red = 1,
    Yellow = 2,
}

impl Disc {
    /// The opponent's disc.
    pub fn other(self) -> Disc {
        match self {
            Disc::Red => Disc::Yellow,
            Disc::Yellow => Disc::Red,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Disc::Red => "Red",
            Disc::Yellow => "Yellow",
        }
    }

    /// Emoji used when rendering the board.
    pub fn symbol(self) -> char {
        match self {
            Disc::Red => '\u{1F534}',    // Red circle
            Disc::Yellow => '\u{1F7E1}', // Yellow circle
        }
    }

    fn from_cell(cell: u8) -> Option<Disc> {
        match cell {
            1 => Some(Disc::Red),
            2 => Some(Disc::Yellow),
            _ => None,
        }
    }
}

impl fmt::Display for Disc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Disc {
    type Err = ParseDiscError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" | "r" => Ok(Disc::Red),
            "yellow" | "y" => Ok(Disc::Yellow),
            other => Err(ParseDiscError(other.to_string())),
        }
    }
}

/// Empty cell marker used by [`Board`]'s Display
const EMPTY_SYMBOL: char = '\u{26AA}'; // White circle

/// Direction vectors: horizontal, vertical, diagonal /, diagonal \
const DIRECTIONS: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// Connect 4 position.
///
/// Boards are values: every move produces a new board and leaves the old one
/// untouched, so positions stored in a search tree never alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    /// 0=empty, 1=Red, 2=Yellow. Row-major with row 0 at the bottom
    cells: [u8; BOARD_SIZE],
    /// Number of discs in each column
    heights: [u8; COLS],
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self {
            cells: [0; BOARD_SIZE],
            heights: [0; COLS],
        }
    }

    /// Play `columns` in order, alternating discs starting with `first`.
    pub fn from_moves(first: Disc, columns: &[usize]) -> Result<Self, MoveError> {
        let mut board = Self::new();
        let mut disc = first;
        for &column in columns {
            board = board.drop_disc(column, disc)?;
            disc = disc.other();
        }
        Ok(board)
    }

    /// Convert column and row to board index
    #[inline]
    fn pos(col: usize, row: usize) -> usize {
        row * COLS + col
    }

    /// Disc at (col, row), row 0 being the bottom. None for empty or
    /// out-of-range cells.
    pub fn cell(&self, col: usize, row: usize) -> Option<Disc> {
        if col >= COLS || row >= ROWS {
            return None;
        }
        Disc::from_cell(self.cells[Self::pos(col, row)])
    }

    /// Number of discs in `col` (0 for out-of-range columns).
    pub fn height(&self, col: usize) -> usize {
        self.heights.get(col).map_or(0, |&h| h as usize)
    }

    /// Total number of discs on the board.
    pub fn moves_played(&self) -> usize {
        self.heights.iter().map(|&h| h as usize).sum()
    }

    /// True for full columns and for columns that do not exist.
    pub fn is_column_full(&self, col: usize) -> bool {
        col >= COLS || self.heights[col] as usize >= ROWS
    }

    /// Columns that can still take a disc, in ascending order.
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..COLS).filter(|&col| !self.is_column_full(col)).collect()
    }

    pub fn is_full(&self) -> bool {
        self.heights.iter().all(|&h| h as usize >= ROWS)
    }

    /// Drop `disc` into `column` and return the resulting board.
    pub fn drop_disc(&self, column: usize, disc: Disc) -> Result<Board, MoveError> {
        if column >= COLS {
            return Err(MoveError::ColumnOutOfRange { column });
        }
        if self.is_column_full(column) {
            return Err(MoveError::ColumnFull { column });
        }

        let mut next = *self;
        let row = self.heights[column] as usize;
        next.cells[Self::pos(column, row)] = disc as u8;
        next.heights[column] += 1;
        Ok(next)
    }

    /// Whether `disc` has four in a row anywhere on the board.
    pub fn has_connect_four(&self, disc: Disc) -> bool {
        let target = disc as u8;

        for row in 0..ROWS {
            for col in 0..COLS {
                if self.cells[Self::pos(col, row)] != target {
                    continue;
                }

                for (dc, dr) in DIRECTIONS {
                    if self.run_length(col, row, dc, dr, target) >= 4 {
                        return true;
                    }
                }
            }
        }

        false
    }

    /// Count consecutive `target` cells starting at (col, row) along (dc, dr).
    fn run_length(&self, col: usize, row: usize, dc: i32, dr: i32, target: u8) -> usize {
        let mut count = 0;
        let (mut c, mut r) = (col as i32, row as i32);

        while c >= 0 && c < COLS as i32 && r >= 0 && r < ROWS as i32 {
            if self.cells[Self::pos(c as usize, r as usize)] != target {
                break;
            }
            count += 1;
            if count == 4 {
                break;
            }
            c += dc;
            r += dr;
        }

        count
    }

    /// First column whose height differs from `other`'s.
    ///
    /// For a board one move ahead of `other` this is the column just played.
    pub fn changed_column(&self, other: &Board) -> Option<usize> {
        (0..COLS).find(|&col| self.heights[col] != other.heights[col])
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header: Vec<String> = (0..COLS).map(|col| col.to_string()).collect();
        writeln!(f, " {}", header.join("  "))?;

        for row in (0..ROWS).rev() {
            for col in 0..COLS {
                let symbol = self.cell(col, row).map_or(EMPTY_SYMBOL, Disc::symbol);
                write!(f, "{} ", symbol)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Connect 4 rules for the search engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Connect4Rules;

impl GameRules for Connect4Rules {
    type Board = Board;
    type Player = Disc;

    fn legal_next_positions(&self, board: &Board, player: Disc) -> Vec<Board> {
        (0..COLS)
            .filter_map(|col| board.drop_disc(col, player).ok())
            .collect()
    }

    fn has_won(&self, board: &Board, side: Disc) -> bool {
        board.has_connect_four(side)
    }

    fn other_player(&self, player: Disc) -> Disc {
        player.other()
    }
}
