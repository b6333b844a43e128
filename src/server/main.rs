#![cfg(feature = "server")]

use clap::Parser;
use grid_duel::config::ServerConfig;
use grid_duel::registry::MemoryRegistry;
use grid_duel::server::{serve, GatewayState, LogConfig};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
pub async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::parse();

    LogConfig::default()
        .with_level(config.log_level)
        .with_json(config.log_json)
        .init()?;

    let state = GatewayState::new(Arc::new(MemoryRegistry::new()), config.turn_timeout());
    let listener = TcpListener::bind(config.listen).await?;
    info!(
        addr = %listener.local_addr()?,
        turn_timeout = ?config.turn_timeout(),
        "Listening for websocket connections on /ws"
    );

    serve(listener, state).await?;
    Ok(())
}
