use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub default_level: tracing::Level,
    pub json_format: bool,
    pub show_thread_ids: bool,
    pub show_targets: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            default_level: tracing::Level::INFO,
            json_format: false,
            show_thread_ids: false,
            show_targets: true,
        }
    }
}

impl LogConfig {
    /// Verbose, human-readable
    pub fn dev() -> Self {
        Self {
            default_level: tracing::Level::DEBUG,
            show_thread_ids: true,
            ..Default::default()
        }
    }

    pub fn with_level(mut self, level: tracing::Level) -> Self {
        self.default_level = level;
        self
    }

    pub fn with_json(mut self, json_format: bool) -> Self {
        self.json_format = json_format;
        self
    }

    /// Filter used when `RUST_LOG` is unset.
    pub fn default_directive(&self) -> String {
        format!(
            "{}={}",
            env!("CARGO_PKG_NAME").replace('-', "_"),
            self.default_level.as_str().to_ascii_lowercase()
        )
    }

    pub fn init(self) -> Result<(), String> {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.default_directive()));

        if self.json_format {
            let fmt_layer = fmt::layer()
                .json()
                .with_target(self.show_targets)
                .with_thread_ids(self.show_thread_ids);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()
                .map_err(|e| format!("Failed to initialize tracing: {}", e))
        } else {
            let fmt_layer = fmt::layer()
                .with_target(self.show_targets)
                .with_thread_ids(self.show_thread_ids);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()
                .map_err(|e| format!("Failed to initialize tracing: {}", e))
        }
    }
}
