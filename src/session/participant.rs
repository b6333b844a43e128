use crate::model::Side;
use crate::protocol::ServerMessage;
use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

pub type ClientId = Uuid;

/// Outbound queue of one connection. Unbounded so that sending never waits
/// while a session is locked.
pub type Outbox = UnboundedSender<ServerMessage>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Participant {
    pub client_id: ClientId,
    pub side: Side,
}

/// A message addressed to one participant.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub recipient: ClientId,
    pub message: ServerMessage,
}

impl Envelope {
    pub fn new(recipient: ClientId, message: ServerMessage) -> Self {
        Self { recipient, message }
    }
}
