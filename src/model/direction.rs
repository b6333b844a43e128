use crate::model::{ParseError, Side};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Movement vector relative to the moving side.
///
/// Forward and back depend on the side (they face each other across the grid),
/// left and right are absolute column shifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "F")]
    Forward,
    #[serde(rename = "B")]
    Back,
    #[serde(rename = "L")]
    Left,
    #[serde(rename = "R")]
    Right,
    #[serde(rename = "FL")]
    ForwardLeft,
    #[serde(rename = "FR")]
    ForwardRight,
    #[serde(rename = "BL")]
    BackLeft,
    #[serde(rename = "BR")]
    BackRight,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::Forward,
        Direction::Back,
        Direction::Left,
        Direction::Right,
        Direction::ForwardLeft,
        Direction::ForwardRight,
        Direction::BackLeft,
        Direction::BackRight,
    ];

    /// Single-step `(row, col)` delta for `side`.
    pub fn unit_delta(self, side: Side) -> (i8, i8) {
        let forward = side.forward();
        match self {
            Direction::Forward => (forward, 0),
            Direction::Back => (-forward, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::ForwardLeft => (forward, -1),
            Direction::ForwardRight => (forward, 1),
            Direction::BackLeft => (-forward, -1),
            Direction::BackRight => (-forward, 1),
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Direction::Forward => "F",
            Direction::Back => "B",
            Direction::Left => "L",
            Direction::Right => "R",
            Direction::ForwardLeft => "FL",
            Direction::ForwardRight => "FR",
            Direction::BackLeft => "BL",
            Direction::BackRight => "BR",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Direction {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .into_iter()
            .find(|direction| direction.code() == s)
            .ok_or_else(|| ParseError::UnknownDirection(s.to_string()))
    }
}
