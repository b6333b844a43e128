use crate::error::SessionError;
use crate::model::Side;
use crate::session::{ClientId, Outbox, SessionCode, SessionHandle};
use async_trait::async_trait;

/// Maps session codes to live sessions.
#[async_trait]
pub trait SessionRegistry: Send + Sync {
    /// Creates an empty session under a fresh code.
    async fn create_session(&self) -> Result<SessionHandle, SessionError>;

    /// Attaches `client_id` to the session behind `code`.
    async fn join_session(
        &self,
        code: &SessionCode,
        client_id: ClientId,
        outbox: Outbox,
    ) -> Result<(SessionHandle, Side), SessionError>;

    async fn get_session(&self, code: &SessionCode) -> Option<SessionHandle>;

    /// Drops the session and closes its handle. Removing an unknown code is a
    /// no-op.
    async fn remove_session(&self, code: &SessionCode);

    async fn session_count(&self) -> usize;
}
