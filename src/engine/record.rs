use crate::engine::Move;
use crate::model::{Cell, Direction, PieceId, Side};
use serde::Serialize;
use std::fmt;

/// One accepted move, as kept in the session's log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    pub side: Side,
    pub piece: PieceId,
    pub direction: Direction,
    pub from: Cell,
    pub to: Cell,
    pub captured: Option<PieceId>,
}

impl From<&Move> for MoveRecord {
    fn from(mv: &Move) -> Self {
        Self {
            side: mv.piece.side,
            piece: mv.piece,
            direction: mv.direction,
            from: mv.from,
            to: mv.to,
            captured: mv.captured,
        }
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} -> {}",
            self.piece, self.direction, self.from, self.to
        )?;
        if let Some(captured) = self.captured {
            write!(f, " x {}", captured)?;
        }
        Ok(())
    }
}

/// Append-only log of accepted moves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveLog {
    entries: Vec<MoveRecord>,
}

impl MoveLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: MoveRecord) {
        self.entries.push(record);
    }

    pub fn entries(&self) -> &[MoveRecord] {
        &self.entries
    }

    pub fn last(&self) -> Option<&MoveRecord> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Human-readable entries, oldest first.
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }
}
