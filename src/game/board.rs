use std::fmt;

use serde::{Deserialize, Serialize};

pub const ROWS: usize = 6;
pub const COLS: usize = 7;
/// Number of same-coloured pieces in a line needed to win.
pub const CONNECT_COUNT: usize = 4;
/// The centre column, where pieces take part in the most lines.
pub const CENTER_COL: usize = COLS / 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Red,
    Yellow,
}

/// A single cell on the board. Row 0 is the top, row `ROWS - 1` the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }
}

/// The playing grid. `Board` is a small `Copy` value: moves produce a new
/// board, so earlier positions stay valid while the search backtracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, row 5 is the bottom
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Cell at `pos`.
    pub fn at(&self, pos: Position) -> Cell {
        self.cells[pos.row][pos.col]
    }

    /// A column accepts a piece when it exists and its top cell is empty.
    pub fn is_legal_column(&self, col: usize) -> bool {
        col < COLS && self.cells[0][col] == Cell::Empty
    }

    /// Lowest empty row in `col`, or `None` if the column is full or out of range.
    pub fn drop_row(&self, col: usize) -> Option<usize> {
        if col >= COLS {
            return None;
        }
        (0..ROWS).rev().find(|&row| self.cells[row][col] == Cell::Empty)
    }

    /// Columns that can still take a piece, in ascending order.
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..COLS).filter(|&col| self.is_legal_column(col)).collect()
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.cells[0].iter().all(|&cell| cell != Cell::Empty)
    }

    /// True when no piece has been played yet.
    pub fn is_empty(&self) -> bool {
        // Gravity means an empty bottom row implies an empty board.
        self.cells[ROWS - 1].iter().all(|&cell| cell == Cell::Empty)
    }

    pub fn piece_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell != Cell::Empty)
            .count()
    }

    /// Copy of this board with `cell` written at `pos`. Only the rules engine
    /// places pieces, which keeps the gravity invariant in one place.
    pub(crate) fn with_cell(&self, pos: Position, cell: Cell) -> Board {
        let mut next = *self;
        next.cells[pos.row][pos.col] = cell;
        next
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: Vec<&str> = row
                .iter()
                .map(|cell| match cell {
                    Cell::Empty => ".",
                    Cell::Red => "X",
                    Cell::Yellow => "O",
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        let footer: Vec<String> = (0..COLS).map(|col| col.to_string()).collect();
        write!(f, "{}", footer.join(" "))
    }
}
