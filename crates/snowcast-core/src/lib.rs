pub mod app;
pub mod config;
pub mod error;

pub use app::App;
pub use config::{
    Config, ConfigValidationError, Language, LocationConfig, SuggestionsConfig, UiConfig,
    ValidationResult, WeatherConfig,
};
pub use error::{AppError, ConfigError, NetworkError, ReqwestErrorExt};

use anyhow::Result;

/// Initialize the core application
pub fn init() -> Result<()> {
    // Logs go to stderr so the terminal view owns stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Snowcast core initialized");
    Ok(())
}
