use crate::error::SessionError;
use crate::model::{Direction, PieceId};
use crate::protocol::{ClientMessage, ServerMessage};
use crate::registry::{spawn_turn_timer, SessionRegistry};
use crate::session::{ClientId, Outbox, SessionCode, SessionHandle, SessionStatus};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Per-connection protocol state. Owned by the connection's reader loop.
pub struct ConnectionHandler {
    client_id: ClientId,
    registry: Arc<dyn SessionRegistry>,
    outbox: Outbox,
    session: Option<SessionHandle>,
    turn_timeout: Option<Duration>,
}

impl ConnectionHandler {
    pub fn new(
        registry: Arc<dyn SessionRegistry>,
        outbox: Outbox,
        turn_timeout: Option<Duration>,
    ) -> Self {
        ConnectionHandler {
            client_id: Uuid::new_v4(),
            registry,
            outbox,
            session: None,
            turn_timeout,
        }
    }

    pub fn client_id(&self) -> ClientId {
        self.client_id
    }

    pub fn session_code(&self) -> Option<&SessionCode> {
        self.session.as_ref().map(SessionHandle::code)
    }

    /// Parses one text frame and acts on it. Unparseable frames are answered
    /// with an `error` and otherwise ignored.
    pub async fn handle_text(&mut self, text: &str) {
        match serde_json::from_str::<ClientMessage>(text) {
            Ok(message) => self.handle_message(message).await,
            Err(e) => {
                debug!(client_id = %self.client_id, error = %e, "Failed to parse message");
                self.send(ServerMessage::error(SessionError::Malformed(e.to_string())));
            }
        }
    }

    /// Binary frames must carry the same UTF-8 JSON as text frames.
    pub async fn handle_binary(&mut self, bytes: &[u8]) {
        match std::str::from_utf8(bytes) {
            Ok(text) => self.handle_text(text).await,
            Err(e) => {
                debug!(client_id = %self.client_id, error = %e, "Binary frame is not UTF-8");
                self.send(ServerMessage::error(SessionError::Malformed(format!(
                    "binary frame is not UTF-8: {}",
                    e
                ))));
            }
        }
    }

    #[instrument(skip(self), fields(client_id = %self.client_id))]
    pub async fn handle_message(&mut self, message: ClientMessage) {
        let result = match message {
            ClientMessage::CreateSession => self.create_session().await,
            ClientMessage::JoinSession { code } => self.join_session(code).await,
            ClientMessage::SubmitMove {
                code,
                piece,
                direction,
            } => self.submit_move(code, piece, direction).await,
        };

        if let Err(e) = result {
            debug!(error = %e, "Request rejected");
            self.send(ServerMessage::error(e));
        }
    }

    async fn create_session(&mut self) -> Result<(), SessionError> {
        self.ensure_free().await?;

        let handle = self.registry.create_session().await?;
        self.registry
            .join_session(handle.code(), self.client_id, self.outbox.clone())
            .await?;
        info!(code = %handle.code(), "Created session");
        self.session = Some(handle);
        Ok(())
    }

    async fn join_session(&mut self, code: SessionCode) -> Result<(), SessionError> {
        self.ensure_free().await?;

        let (handle, side) = self
            .registry
            .join_session(&code, self.client_id, self.outbox.clone())
            .await?;
        info!(%code, %side, "Joined session");

        if handle.status().await == SessionStatus::Active {
            let token = handle.turn_token().await;
            self.arm_turn_timer(&handle, token).await;
        }
        self.session = Some(handle);
        Ok(())
    }

    async fn submit_move(
        &mut self,
        code: SessionCode,
        piece: PieceId,
        direction: Direction,
    ) -> Result<(), SessionError> {
        let handle = self
            .registry
            .get_session(&code)
            .await
            .ok_or_else(|| SessionError::SessionNotFound(code.clone()))?;

        let outcome = handle.submit_move(self.client_id, piece, direction).await?;
        if outcome.status.is_over() {
            info!(%code, status = ?outcome.status, "Game over, dropping session");
            self.registry.remove_session(&code).await;
        } else if outcome.accepted {
            self.arm_turn_timer(&handle, outcome.turn_token).await;
        }
        Ok(())
    }

    /// A connection takes part in at most one live session.
    async fn ensure_free(&self) -> Result<(), SessionError> {
        match &self.session {
            Some(handle) if !handle.is_closed().await && !handle.status().await.is_over() => {
                Err(SessionError::AlreadyInSession)
            }
            _ => Ok(()),
        }
    }

    async fn arm_turn_timer(&self, handle: &SessionHandle, token: u64) {
        if let Some(timeout) = self.turn_timeout {
            debug!(code = %handle.code(), token, ?timeout, "Arming turn timer");
            spawn_turn_timer(self.registry.clone(), handle.clone(), token, timeout).await;
        }
    }

    fn send(&self, message: ServerMessage) {
        if self.outbox.send(message).is_err() {
            warn!(client_id = %self.client_id, "Outbox closed");
        }
    }

    /// Leaves the current session, if any. An interrupted session is
    /// dropped from the registry.
    #[instrument(skip(self), fields(client_id = %self.client_id))]
    pub async fn disconnect(&mut self) {
        if let Some(handle) = self.session.take() {
            let status = handle.leave(self.client_id).await;
            if status.is_over() {
                self.registry.remove_session(handle.code()).await;
            }
            info!(code = %handle.code(), ?status, "Left session");
        }
    }
}
