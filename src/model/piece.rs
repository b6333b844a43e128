use crate::model::{ParseError, Side};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Hunter,
}

impl PieceKind {
    /// Number of cells the piece travels per move. Fixed per kind.
    pub fn distance(self) -> i8 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Hunter => 2,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Hunter => 'H',
        }
    }

    pub fn from_char(c: char) -> Option<PieceKind> {
        match c {
            'P' => Some(PieceKind::Pawn),
            'H' => Some(PieceKind::Hunter),
            _ => None,
        }
    }
}

/// Identity of a piece, written `<side>-<kind><ordinal>`, e.g. `A-H1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceId {
    pub side: Side,
    pub kind: PieceKind,
    pub ordinal: u8,
}

impl PieceId {
    pub fn new(side: Side, kind: PieceKind, ordinal: u8) -> Self {
        Self {
            side,
            kind,
            ordinal,
        }
    }

    pub fn pawn(side: Side, ordinal: u8) -> Self {
        Self::new(side, PieceKind::Pawn, ordinal)
    }

    pub fn hunter(side: Side, ordinal: u8) -> Self {
        Self::new(side, PieceKind::Hunter, ordinal)
    }

    pub fn distance(&self) -> i8 {
        self.kind.distance()
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}{}",
            self.side,
            self.kind.as_char(),
            self.ordinal
        )
    }
}

impl FromStr for PieceId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::InvalidPiece(s.to_string());
        let mut chars = s.chars();

        let side = chars.next().and_then(Side::from_char).ok_or_else(invalid)?;
        if chars.next() != Some('-') {
            return Err(invalid());
        }
        let kind = chars
            .next()
            .and_then(PieceKind::from_char)
            .ok_or_else(invalid)?;
        let ordinal = chars.as_str().parse::<u8>().map_err(|_| invalid())?;

        Ok(PieceId::new(side, kind, ordinal))
    }
}

impl Serialize for PieceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
