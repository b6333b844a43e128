use crate::engine::{MoveError, MoveLog, MoveRecord};
use crate::model::{Board, Cell, Direction, PieceId, Position, Side};

/// A move that passed validation against a specific board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub piece: PieceId,
    pub direction: Direction,
    pub from: Cell,
    pub to: Cell,
    pub captured: Option<PieceId>,
}

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Winner(Side),
    /// Both sides without pieces. Unreachable through legal play.
    Draw,
}

impl Outcome {
    pub fn winner(self) -> Option<Side> {
        match self {
            Outcome::Winner(side) => Some(side),
            Outcome::Draw => None,
        }
    }
}

/// Every cell the piece passes through, in order, ending at the target.
/// Positions may lie off the board.
pub fn path_cells(from: Cell, piece: PieceId, direction: Direction) -> Vec<Position> {
    let (rows, cols) = direction.unit_delta(piece.side);
    (1..=piece.distance())
        .map(|step| from.offset(rows * step, cols * step))
        .collect()
}

pub fn compute_target(from: Cell, piece: PieceId, direction: Direction) -> Position {
    let (rows, cols) = direction.unit_delta(piece.side);
    let distance = piece.distance();
    from.offset(rows * distance, cols * distance)
}

/// Checks `piece` moving in `direction` on `board`.
///
/// Only the target can be captured; a mid-path opponent piece is neither
/// captured nor blocking, a mid-path own piece blocks.
pub fn validate(board: &Board, piece: PieceId, direction: Direction) -> Result<Move, MoveError> {
    let from = board
        .locate(piece)
        .ok_or(MoveError::PieceNotFound(piece))?;

    let path = path_cells(from, piece, direction);
    let target = compute_target(from, piece, direction);

    let to = target.to_cell().ok_or(MoveError::OutOfBounds(target))?;

    for position in &path[..path.len() - 1] {
        let cell = position.to_cell().ok_or(MoveError::OutOfBounds(*position))?;
        if board.at(cell).is_some_and(|other| other.side == piece.side) {
            return Err(MoveError::BlockedByOwnPiece(cell));
        }
    }

    let captured = match board.at(to) {
        Some(other) if other.side == piece.side => return Err(MoveError::CaptureOwnPiece(to)),
        occupant => occupant,
    };

    Ok(Move {
        piece,
        direction,
        from,
        to,
        captured,
    })
}

/// Applies a validated move and logs it. Returns the resulting board.
pub fn apply(board: &Board, mv: &Move, log: &mut MoveLog) -> Board {
    let next = board.with_move(mv.piece, mv.to);
    log.push(MoveRecord::from(mv));
    next
}

/// A side with no pieces left loses.
pub fn check_terminal(board: &Board) -> Option<Outcome> {
    let a = board.piece_count(Side::A);
    let b = board.piece_count(Side::B);
    match (a, b) {
        (0, 0) => Some(Outcome::Draw),
        (0, _) => Some(Outcome::Winner(Side::B)),
        (_, 0) => Some(Outcome::Winner(Side::A)),
        _ => None,
    }
}
