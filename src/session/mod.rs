mod code;
mod game_session;
mod handle;
mod participant;
mod status;

pub use code::{SessionCode, CODE_LENGTH};
pub use game_session::{GameSession, OPPONENT_DISCONNECTED};
pub use handle::{SessionHandle, SubmitOutcome};
pub use participant::{ClientId, Envelope, Outbox, Participant};
pub use status::SessionStatus;
