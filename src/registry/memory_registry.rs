use super::SessionRegistry;
use crate::error::SessionError;
use crate::model::Side;
use crate::session::{ClientId, GameSession, Outbox, SessionCode, SessionHandle};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use tracing::{debug, info, instrument, warn};

/// Attempts at drawing an unused code before giving up.
pub const MAX_CODE_ATTEMPTS: usize = 16;

type CodeGenerator = Box<dyn Fn() -> SessionCode + Send + Sync>;

/// In-memory registry. The map lock is only held for lookups and
/// inserts/removals, never while a session is being worked on.
pub struct MemoryRegistry {
    sessions: RwLock<HashMap<SessionCode, SessionHandle>>,
    generate_code: CodeGenerator,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::with_code_generator(SessionCode::generate)
    }

    pub fn with_code_generator(
        generate_code: impl Fn() -> SessionCode + Send + Sync + 'static,
    ) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            generate_code: Box::new(generate_code),
        }
    }
}

impl Default for MemoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRegistry for MemoryRegistry {
    #[instrument(skip(self))]
    async fn create_session(&self) -> Result<SessionHandle, SessionError> {
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let code = (self.generate_code)();
            if sessions.contains_key(&code) {
                debug!(%code, attempt, "Session code collision, regenerating");
                continue;
            }
            let handle = SessionHandle::new(GameSession::new(code.clone()));
            sessions.insert(code.clone(), handle.clone());
            info!(%code, live = sessions.len(), "Session created");
            return Ok(handle);
        }

        warn!(attempts = MAX_CODE_ATTEMPTS, "No free session code");
        Err(SessionError::CodesExhausted)
    }

    #[instrument(skip(self, outbox))]
    async fn join_session(
        &self,
        code: &SessionCode,
        client_id: ClientId,
        outbox: Outbox,
    ) -> Result<(SessionHandle, Side), SessionError> {
        let handle = self
            .get_session(code)
            .await
            .ok_or_else(|| SessionError::SessionNotFound(code.clone()))?;
        let side = handle.join(client_id, outbox).await?;
        Ok((handle, side))
    }

    async fn get_session(&self, code: &SessionCode) -> Option<SessionHandle> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(code)
            .cloned()
    }

    #[instrument(skip(self))]
    async fn remove_session(&self, code: &SessionCode) {
        let removed = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(code);

        if let Some(handle) = removed {
            handle.close().await;
            info!(%code, "Session removed");
        }
    }

    async fn session_count(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionStatus;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::mpsc::unbounded_channel;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_create_session() {
        let registry = MemoryRegistry::new();
        let handle = registry.create_session().await.unwrap();

        assert_eq!(registry.session_count().await, 1);
        assert_eq!(handle.status().await, SessionStatus::WaitingForOpponent);
        assert!(registry.get_session(handle.code()).await.is_some());
    }

    #[tokio::test]
    async fn test_create_regenerates_on_collision() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        // yields "aaaaaa", "aaaaaa", "bbbbbb", ...
        let registry = MemoryRegistry::with_code_generator(move || {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            if n < 2 {
                SessionCode::from("aaaaaa")
            } else {
                SessionCode::from("bbbbbb")
            }
        });

        let first = registry.create_session().await.unwrap();
        let second = registry.create_session().await.unwrap();

        assert_eq!(first.code(), &SessionCode::from("aaaaaa"));
        assert_eq!(second.code(), &SessionCode::from("bbbbbb"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_create_gives_up_when_codes_exhausted() {
        let registry = MemoryRegistry::with_code_generator(|| SessionCode::from("same"));
        registry.create_session().await.unwrap();

        assert_eq!(
            registry.create_session().await.err(),
            Some(SessionError::CodesExhausted)
        );
        assert_eq!(registry.session_count().await, 1);
    }

    #[tokio::test]
    async fn test_join_session() {
        let registry = MemoryRegistry::new();
        let handle = registry.create_session().await.unwrap();
        let code = handle.code().clone();

        let (tx, _rx) = unbounded_channel();
        let (_, side) = registry
            .join_session(&code, Uuid::new_v4(), tx)
            .await
            .unwrap();
        assert_eq!(side, Side::A);

        let (tx, _rx) = unbounded_channel();
        let (_, side) = registry
            .join_session(&code, Uuid::new_v4(), tx)
            .await
            .unwrap();
        assert_eq!(side, Side::B);
        assert_eq!(handle.status().await, SessionStatus::Active);

        let (tx, _rx) = unbounded_channel();
        assert_eq!(
            registry
                .join_session(&code, Uuid::new_v4(), tx)
                .await
                .err(),
            Some(SessionError::SessionFull(code))
        );
    }

    #[tokio::test]
    async fn test_join_unknown_code() {
        let registry = MemoryRegistry::new();
        let (tx, _rx) = unbounded_channel();
        let code = SessionCode::from("nope00");

        assert_eq!(
            registry.join_session(&code, Uuid::new_v4(), tx).await.err(),
            Some(SessionError::SessionNotFound(code))
        );
    }

    #[tokio::test]
    async fn test_remove_session_closes_handle() {
        let registry = MemoryRegistry::new();
        let handle = registry.create_session().await.unwrap();
        let code = handle.code().clone();

        registry.remove_session(&code).await;

        assert_eq!(registry.session_count().await, 0);
        assert!(registry.get_session(&code).await.is_none());
        assert!(handle.is_closed().await);

        // removing twice is fine
        registry.remove_session(&code).await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_get_unique_codes() {
        let registry = Arc::new(MemoryRegistry::new());

        let tasks: Vec<_> = (0..64)
            .map(|_| {
                let registry = registry.clone();
                tokio::spawn(async move { registry.create_session().await })
            })
            .collect();

        let mut codes = Vec::new();
        for task in tasks {
            codes.push(task.await.unwrap().unwrap().code().clone());
        }
        codes.sort();
        codes.dedup();

        assert_eq!(codes.len(), 64);
        assert_eq!(registry.session_count().await, 64);
    }
}
