mod board;
mod cell;
mod direction;
mod error;
mod piece;
mod side;

pub use board::Board;
pub use cell::{Cell, Position, BOARD_SIZE};
pub use direction::Direction;
pub use error::{BoardError, ParseError};
pub use piece::{PieceId, PieceKind};
pub use side::Side;
