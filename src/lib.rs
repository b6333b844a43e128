pub mod engine;
pub mod error;
pub mod model;
pub mod protocol;
pub mod registry;
pub mod session;

#[cfg(feature = "server")]
pub mod config;
#[cfg(feature = "server")]
pub mod server;

pub mod prelude {
    pub use crate::engine::{MoveError, MoveLog, MoveRecord, Outcome};
    pub use crate::error::SessionError;
    pub use crate::model::{Board, Cell, Direction, PieceId, PieceKind, Side};
    pub use crate::protocol::{ClientMessage, ServerMessage};
    pub use crate::registry::{MemoryRegistry, SessionRegistry};
    pub use crate::session::{GameSession, SessionCode, SessionHandle, SessionStatus};
}
