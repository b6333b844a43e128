//! Websocket gateway: one `ConnectionHandler` per socket, all of them
//! sharing one registry.

mod connection_handler;
pub mod route;
pub mod telemetry;
pub mod websocket_listener;

pub use connection_handler::ConnectionHandler;
pub use route::create_router;
pub use telemetry::LogConfig;

use crate::registry::{MemoryRegistry, SessionRegistry};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

#[derive(Clone)]
pub struct GatewayState {
    pub registry: Arc<dyn SessionRegistry>,
    pub turn_timeout: Option<Duration>,
}

impl GatewayState {
    pub fn new(registry: Arc<dyn SessionRegistry>, turn_timeout: Option<Duration>) -> Self {
        Self {
            registry,
            turn_timeout,
        }
    }
}

impl Default for GatewayState {
    fn default() -> Self {
        Self::new(Arc::new(MemoryRegistry::new()), None)
    }
}

/// Serves the gateway on an already bound listener until it fails.
pub async fn serve(listener: TcpListener, state: GatewayState) -> std::io::Result<()> {
    axum::serve(listener, create_router(state)).await
}
