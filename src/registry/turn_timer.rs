use super::SessionRegistry;
use crate::session::SessionHandle;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Arms a forfeit timer for the turn identified by `token`.
///
/// If no move has been accepted when the timer fires, the side to move
/// loses and the session is dropped from the registry. The session keeps
/// the timer's abort handle: arming the next turn or closing the session
/// aborts it, so at most one timer per session is pending.
pub async fn spawn_turn_timer(
    registry: Arc<dyn SessionRegistry>,
    handle: SessionHandle,
    token: u64,
    timeout: Duration,
) -> JoinHandle<()> {
    let session = handle.clone();
    let timer = tokio::spawn(async move {
        tokio::time::sleep(timeout).await;

        let status = handle.expire_turn(token).await;
        if status.is_over() {
            info!(code = %handle.code(), token, "Turn timer ended session");
            registry.remove_session(handle.code()).await;
        } else {
            debug!(code = %handle.code(), token, "Turn timer fired for a stale turn");
        }
    });
    session.set_turn_timer(timer.abort_handle()).await;
    timer
}
