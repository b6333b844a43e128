use crate::session::SessionCode;
use thiserror::Error;

/// Protocol-level failures. The display text is the `error` message sent back
/// to the offending connection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    SessionNotFound(SessionCode),

    #[error("Session full: {0}")]
    SessionFull(SessionCode),

    #[error("Already joined this session")]
    AlreadyJoined,

    #[error("Already in a session")]
    AlreadyInSession,

    #[error("Not a participant in this session")]
    NotAParticipant,

    #[error("Not your turn")]
    NotYourTurn,

    #[error("Malformed request: {0}")]
    Malformed(String),

    #[error("Could not allocate a session code")]
    CodesExhausted,
}
