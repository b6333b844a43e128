use serde::{Deserialize, Serialize};
use std::fmt;

/// Width and height of the grid.
pub const BOARD_SIZE: u8 = 5;

/// A cell on the grid. Always within `0..BOARD_SIZE` on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Cell {
    row: u8,
    col: u8,
}

impl Cell {
    pub fn new(row: u8, col: u8) -> Option<Self> {
        (row < BOARD_SIZE && col < BOARD_SIZE).then_some(Self { row, col })
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    pub fn col(&self) -> u8 {
        self.col
    }

    pub fn position(&self) -> Position {
        Position {
            row: self.row as i8,
            col: self.col as i8,
        }
    }

    pub fn offset(&self, rows: i8, cols: i8) -> Position {
        let origin = self.position();
        Position {
            row: origin.row + rows,
            col: origin.col + cols,
        }
    }

    /// All cells in row-major order.
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Cell { row, col }))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Unbounded grid coordinate; the result of movement arithmetic before bounds
/// checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i8,
    pub col: i8,
}

impl Position {
    pub fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    pub fn to_cell(self) -> Option<Cell> {
        let row = u8::try_from(self.row).ok()?;
        let col = u8::try_from(self.col).ok()?;
        Cell::new(row, col)
    }

    pub fn is_on_board(self) -> bool {
        self.to_cell().is_some()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}
