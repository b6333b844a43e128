use crate::model::{Cell, PieceId, Position};
use thiserror::Error;

/// Game rule violations. The display text is the `invalid_move` reason sent to
/// the offending participant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("Target out of bounds: {0}")]
    OutOfBounds(Position),

    #[error("Path blocked by own piece at {0}")]
    BlockedByOwnPiece(Cell),

    #[error("Cannot capture own piece at {0}")]
    CaptureOwnPiece(Cell),

    #[error("Piece not found: {0}")]
    PieceNotFound(PieceId),

    #[error("Cannot move opponent's piece: {0}")]
    NotYourPiece(PieceId),

    #[error("Game has not started")]
    NotStarted,

    #[error("Game already finished")]
    AlreadyFinished,
}
