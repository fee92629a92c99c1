//! Device position sources.
//!
//! The terminal host has no platform geolocation, so the "device" position
//! comes from the `[location]` config section.

use async_trait::async_trait;
use snowcast_core::LocationConfig;

use crate::types::{Coordinates, LocationError};

/// A one-shot source of the device position
#[async_trait]
pub trait DeviceLocator: Send + Sync {
    /// Whether a position source exists at all
    fn is_supported(&self) -> bool;

    /// Request the current position once. No retry.
    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// Position taken from configuration
#[derive(Debug, Clone)]
pub struct ConfiguredLocator {
    enabled: bool,
    position: Option<Coordinates>,
}

impl ConfiguredLocator {
    pub fn new(enabled: bool, position: Option<Coordinates>) -> Self {
        Self { enabled, position }
    }

    pub fn from_config(config: &LocationConfig) -> Self {
        Self::new(
            config.enabled,
            config
                .coordinates()
                .map(|(lat, lon)| Coordinates::new(lat, lon)),
        )
    }
}

#[async_trait]
impl DeviceLocator for ConfiguredLocator {
    fn is_supported(&self) -> bool {
        self.position.is_some()
    }

    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        if !self.enabled {
            tracing::debug!("Location access disabled in config");
            return Err(LocationError::PermissionDenied);
        }
        self.position.ok_or(LocationError::Unavailable)
    }
}
