use anyhow::Result;
use std::sync::Arc;

use crate::config::{Config, ValidationResult};

/// Application state and lifecycle manager
pub struct App {
    config: Arc<Config>,
    validation: ValidationResult,
}

impl App {
    /// Create a new application instance from the user's config file
    pub fn new() -> Result<Self> {
        let (config, validation) = Config::load_validated()?;
        Ok(Self::with_config(config, validation))
    }

    /// Create an application instance from an already loaded config
    pub fn with_config(config: Config, validation: ValidationResult) -> Self {
        Self {
            config: Arc::new(config),
            validation,
        }
    }

    /// Log the effective settings once the host is about to start
    pub fn initialize(&mut self) -> Result<()> {
        tracing::info!(
            language = self.config.ui.language.tag(),
            geocoder = %self.config.weather.geocoding_url,
            forecast = %self.config.weather.forecast_url,
            warnings = self.validation.warnings.len(),
            "Application initialized"
        );
        Ok(())
    }

    /// Shutdown the application
    pub fn shutdown(&mut self) -> Result<()> {
        tracing::info!("Shutting down application");
        Ok(())
    }

    /// Get reference to application config
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Shared handle to the application config
    pub fn config_handle(&self) -> Arc<Config> {
        self.config.clone()
    }

    /// Warnings produced while validating the config
    pub fn warnings(&self) -> &[crate::config::ConfigValidationError] {
        &self.validation.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_config_exposes_settings() {
        let mut config = Config::default();
        config.suggestions.limit = 5;
        let validation = config.validate();
        let mut app = App::with_config(config, validation);

        assert!(app.initialize().is_ok());
        assert_eq!(app.config().suggestions.limit, 5);
        assert_eq!(app.config_handle().suggestions.limit, 5);
        assert!(app.warnings().is_empty());
        assert!(app.shutdown().is_ok());
    }
}
