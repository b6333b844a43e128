use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two competing players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::A, Side::B];

    pub fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    /// Row the side's pieces start on.
    pub fn home_row(self) -> u8 {
        match self {
            Side::A => 0,
            Side::B => 4,
        }
    }

    /// Row delta of one step "forward", i.e. toward the opponent's home row.
    pub fn forward(self) -> i8 {
        match self {
            Side::A => 1,
            Side::B => -1,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Side::A => 'A',
            Side::B => 'B',
        }
    }

    pub fn from_char(c: char) -> Option<Side> {
        match c {
            'A' => Some(Side::A),
            'B' => Some(Side::B),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
