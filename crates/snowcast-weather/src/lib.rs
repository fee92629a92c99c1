//! Weather data for Snowcast
//!
//! City search and forecasts via the Open-Meteo APIs, the weather-code icon
//! table, and device position sources.

pub mod geocode;
pub mod icon;
pub mod location;
pub mod provider;
pub mod types;

pub use geocode::{Geocoder, LocationSearch};
pub use icon::{map_code, IconCategory};
pub use location::{ConfiguredLocator, DeviceLocator};
pub use provider::{ForecastSource, WeatherProvider};
pub use types::*;
