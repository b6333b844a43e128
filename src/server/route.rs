use crate::server::{websocket_listener, GatewayState};
use axum::{routing::get, Router};

pub fn create_router(state: GatewayState) -> Router {
    Router::new()
        .route("/ws", get(websocket_listener::handle_websocket))
        .with_state(state)
}
