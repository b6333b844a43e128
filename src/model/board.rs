use crate::model::{BoardError, Cell, PieceId, Side, BOARD_SIZE};
use serde::{Deserialize, Deserializer, Serialize};

const SIZE: usize = BOARD_SIZE as usize;

type Grid = [[Option<PieceId>; SIZE]; SIZE];

/// The 5×5 grid. Serialized as an array of rows, each cell `null` or a piece id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Board {
    cells: Grid,
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: [[None; SIZE]; SIZE],
        }
    }

    /// Starting layout: one Pawn and two Hunters per side on their home rows,
    /// with mirrored columns.
    ///
    /// ```text
    /// A-P1 A-H1 A-H2  .    .
    ///  .    .    .    .    .
    ///  .    .    .    .    .
    ///  .    .    .    .    .
    ///  .    .   B-H2 B-H1 B-P1
    /// ```
    pub fn initial() -> Self {
        let mut cells = [[None; SIZE]; SIZE];
        let roster = [
            PieceId::pawn(Side::A, 1),
            PieceId::hunter(Side::A, 1),
            PieceId::hunter(Side::A, 2),
        ];
        let a_row = Side::A.home_row() as usize;
        let b_row = Side::B.home_row() as usize;
        for (col, piece) in roster.into_iter().enumerate() {
            cells[a_row][col] = Some(piece);
            cells[b_row][SIZE - 1 - col] = Some(PieceId {
                side: Side::B,
                ..piece
            });
        }
        Self { cells }
    }

    /// Puts `piece` on an empty cell. Used for setting up positions.
    pub fn place(&mut self, piece: PieceId, cell: Cell) -> Result<(), BoardError> {
        if self.at(cell).is_some() {
            return Err(BoardError::Occupied(cell));
        }
        if self.locate(piece).is_some() {
            return Err(BoardError::DuplicatePiece(piece));
        }
        self.cells[cell.row() as usize][cell.col() as usize] = Some(piece);
        Ok(())
    }

    pub fn at(&self, cell: Cell) -> Option<PieceId> {
        self.cells[cell.row() as usize][cell.col() as usize]
    }

    pub fn locate(&self, piece: PieceId) -> Option<Cell> {
        Cell::all().find(|&cell| self.at(cell) == Some(piece))
    }

    /// Returns a copy with `piece` moved to `target`. Whatever stood on `target`
    /// is gone from the returned board.
    pub fn with_move(&self, piece: PieceId, target: Cell) -> Board {
        let mut next = self.clone();
        if let Some(source) = self.locate(piece) {
            next.cells[source.row() as usize][source.col() as usize] = None;
        }
        next.cells[target.row() as usize][target.col() as usize] = Some(piece);
        next
    }

    /// Occupied cells of `side`, row-major.
    pub fn pieces(&self, side: Side) -> impl Iterator<Item = (Cell, PieceId)> + '_ {
        Cell::all().filter_map(move |cell| {
            self.at(cell)
                .filter(|piece| piece.side == side)
                .map(|piece| (cell, piece))
        })
    }

    pub fn piece_count(&self, side: Side) -> usize {
        self.pieces(side).count()
    }

    pub fn total_pieces(&self) -> usize {
        Side::ALL.iter().map(|&side| self.piece_count(side)).sum()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let grid = Grid::deserialize(deserializer)?;
        let mut board = Board::empty();
        for cell in Cell::all() {
            if let Some(piece) = grid[cell.row() as usize][cell.col() as usize] {
                board.place(piece, cell).map_err(serde::de::Error::custom)?;
            }
        }
        Ok(board)
    }
}
