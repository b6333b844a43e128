//! Wire messages. Every frame is a JSON object discriminated by `type`.

use crate::model::{Board, Direction, PieceId, Side};
use crate::session::{SessionCode, SessionStatus};
use serde::{Deserialize, Serialize};

/// Messages sent by participants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    CreateSession,
    JoinSession {
        code: SessionCode,
    },
    SubmitMove {
        code: SessionCode,
        piece: PieceId,
        direction: Direction,
    },
}

/// Messages sent by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    SessionCreated {
        code: SessionCode,
        side: Side,
    },
    SessionJoined {
        code: SessionCode,
        side: Side,
    },
    #[serde(rename_all = "camelCase")]
    StateUpdate {
        board: Board,
        current_turn: Side,
        move_history: Vec<String>,
        status: SessionStatus,
    },
    InvalidMove {
        reason: String,
    },
    GameOver {
        winner: Option<Side>,
    },
    Error {
        message: String,
    },
}

impl ServerMessage {
    pub fn error(error: impl ToString) -> Self {
        ServerMessage::Error {
            message: error.to_string(),
        }
    }

    pub fn invalid_move(reason: impl ToString) -> Self {
        ServerMessage::InvalidMove {
            reason: reason.to_string(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ServerMessage::SessionCreated { .. } => "session_created",
            ServerMessage::SessionJoined { .. } => "session_joined",
            ServerMessage::StateUpdate { .. } => "state_update",
            ServerMessage::InvalidMove { .. } => "invalid_move",
            ServerMessage::GameOver { .. } => "game_over",
            ServerMessage::Error { .. } => "error",
        }
    }
}
