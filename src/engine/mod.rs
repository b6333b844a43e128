//! Move validation and state transitions over a [`Board`](crate::model::Board).
//!
//! Target and path arithmetic live in one place ([`compute_target`] and
//! [`path_cells`]) and feed both [`validate`] and [`apply`].

mod error;
mod record;
mod rules;

pub use error::MoveError;
pub use record::{MoveLog, MoveRecord};
pub use rules::{apply, check_terminal, compute_target, path_cells, validate, Move, Outcome};
