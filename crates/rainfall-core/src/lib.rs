pub mod config;
pub mod error;

pub use config::{
    BackendConfig, Config, ConfigValidationError, LocationConfig, UiConfig, ValidationResult,
};
pub use error::{ConfigError, NetworkError, ReqwestErrorExt};

/// Initialize logging for a host process.
///
/// Library crates only emit `tracing` events; the binary decides where they go.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();

    tracing::info!("Rainfall form core initialized");
}
