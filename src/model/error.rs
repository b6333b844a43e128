use crate::model::{Cell, PieceId};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid piece id: {0}")]
    InvalidPiece(String),

    #[error("Unknown direction: {0}")]
    UnknownDirection(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Cell {0} is already occupied")]
    Occupied(Cell),

    #[error("Piece {0} is already on the board")]
    DuplicatePiece(PieceId),
}
