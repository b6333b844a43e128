use crate::error::SessionError;
use crate::model::{Direction, PieceId, Side};
use crate::protocol::ServerMessage;
use crate::session::{ClientId, Envelope, GameSession, Outbox, SessionCode, SessionStatus};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::AbortHandle;
use tracing::{debug, instrument};

/// Result of a move submission as seen by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub accepted: bool,
    pub status: SessionStatus,
    pub turn_token: u64,
}

struct Slot {
    session: GameSession,
    outboxes: HashMap<ClientId, Outbox>,
    /// Set once the registry drops the session; the code is dead from then on.
    closed: bool,
    /// Forfeit timer armed for the current turn.
    turn_timer: Option<AbortHandle>,
}

impl Slot {
    /// A finished or abandoned session is unreachable by code even before
    /// the registry drops it.
    fn is_dead(&self) -> bool {
        self.closed || self.session.status().is_over()
    }

    /// Runs while the slot is locked, so messages of one session are queued in
    /// the order their transitions happened.
    fn deliver(&self, envelopes: Vec<Envelope>) {
        for envelope in envelopes {
            match self.outboxes.get(&envelope.recipient) {
                Some(outbox) => {
                    if outbox.send(envelope.message).is_err() {
                        debug!(recipient = %envelope.recipient, "Outbox closed, dropping message");
                    }
                }
                None => debug!(recipient = %envelope.recipient, "No outbox for recipient"),
            }
        }
    }
}

/// Shared handle to one session.
///
/// All access goes through a per-session mutex, so validate, apply and the
/// enqueueing of the broadcast happen as one step per session. Different
/// sessions never share a lock.
#[derive(Clone)]
pub struct SessionHandle {
    code: SessionCode,
    slot: Arc<Mutex<Slot>>,
}

impl SessionHandle {
    pub fn new(session: GameSession) -> Self {
        SessionHandle {
            code: session.code().clone(),
            slot: Arc::new(Mutex::new(Slot {
                session,
                outboxes: HashMap::new(),
                closed: false,
                turn_timer: None,
            })),
        }
    }

    pub fn code(&self) -> &SessionCode {
        &self.code
    }

    #[instrument(skip(self, outbox), fields(code = %self.code))]
    pub async fn join(&self, client_id: ClientId, outbox: Outbox) -> Result<Side, SessionError> {
        let mut slot = self.slot.lock().await;
        if slot.closed {
            return Err(SessionError::SessionNotFound(self.code.clone()));
        }
        let (side, envelopes) = slot.session.join(client_id)?;
        slot.outboxes.insert(client_id, outbox);
        slot.deliver(envelopes);
        Ok(side)
    }

    #[instrument(skip(self), fields(code = %self.code))]
    pub async fn submit_move(
        &self,
        client_id: ClientId,
        piece: PieceId,
        direction: Direction,
    ) -> Result<SubmitOutcome, SessionError> {
        let mut slot = self.slot.lock().await;
        if slot.is_dead() {
            return Err(SessionError::SessionNotFound(self.code.clone()));
        }
        let before = slot.session.turn_token();
        let envelopes = slot.session.submit_move(client_id, piece, direction);
        slot.deliver(envelopes);
        Ok(SubmitOutcome {
            accepted: slot.session.turn_token() != before,
            status: slot.session.status(),
            turn_token: slot.session.turn_token(),
        })
    }

    #[instrument(skip(self), fields(code = %self.code))]
    pub async fn leave(&self, client_id: ClientId) -> SessionStatus {
        let mut slot = self.slot.lock().await;
        let envelopes = slot.session.leave(client_id);
        slot.deliver(envelopes);
        slot.outboxes.remove(&client_id);
        slot.session.status()
    }

    /// Forfeits the current turn if `token` is still current.
    pub async fn expire_turn(&self, token: u64) -> SessionStatus {
        let mut slot = self.slot.lock().await;
        if slot.closed {
            return slot.session.status();
        }
        if token == slot.session.turn_token() {
            slot.turn_timer = None;
        }
        let envelopes = slot.session.expire_turn(token);
        slot.deliver(envelopes);
        slot.session.status()
    }

    /// Keeps `timer` as the forfeit timer of the current turn and aborts the
    /// one it replaces. A dead session aborts `timer` right away.
    pub async fn set_turn_timer(&self, timer: AbortHandle) {
        let mut slot = self.slot.lock().await;
        if slot.is_dead() {
            timer.abort();
            return;
        }
        if let Some(previous) = slot.turn_timer.replace(timer) {
            previous.abort();
        }
    }

    /// Marks the code dead. Later calls fail with `SessionNotFound`.
    pub async fn close(&self) {
        let mut slot = self.slot.lock().await;
        slot.closed = true;
        slot.outboxes.clear();
        if let Some(timer) = slot.turn_timer.take() {
            timer.abort();
        }
    }

    pub async fn is_closed(&self) -> bool {
        self.slot.lock().await.closed
    }

    pub async fn status(&self) -> SessionStatus {
        self.slot.lock().await.session.status()
    }

    pub async fn turn_token(&self) -> u64 {
        self.slot.lock().await.session.turn_token()
    }

    /// Clone of the current session state.
    pub async fn snapshot(&self) -> GameSession {
        self.slot.lock().await.session.clone()
    }

    pub async fn state_update(&self) -> ServerMessage {
        self.slot.lock().await.session.state_update()
    }
}
