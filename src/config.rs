use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

/// Server settings. Every flag can also be set through the environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "grid-duel-server")]
#[command(version, about = "Two-player grid duel game server")]
pub struct ServerConfig {
    /// Address the websocket gateway binds to
    #[arg(long, env = "GRID_DUEL_LISTEN", default_value = "0.0.0.0:8080")]
    pub listen: SocketAddr,

    /// Seconds a side may take before forfeiting; unset disables the timer
    #[arg(long, env = "GRID_DUEL_TURN_TIMEOUT_SECS")]
    pub turn_timeout_secs: Option<u64>,

    /// Emit logs as JSON lines
    #[arg(long, env = "GRID_DUEL_LOG_JSON")]
    pub log_json: bool,

    /// Default level when RUST_LOG is not set
    #[arg(long, env = "GRID_DUEL_LOG_LEVEL", default_value = "info")]
    pub log_level: tracing::Level,
}

impl ServerConfig {
    pub fn turn_timeout(&self) -> Option<Duration> {
        self.turn_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([0, 0, 0, 0], 8080)),
            turn_timeout_secs: None,
            log_json: false,
            log_level: tracing::Level::INFO,
        }
    }
}
