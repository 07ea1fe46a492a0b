//! Core library for the `skycast` weather dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The provider gateway (real Weatherstack client + synthetic generator)
//! - The aggregation orchestrator driving a dashboard refresh
//! - Pure derivation functions applied at presentation time
//! - The saved-locations store with injected persistence
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod dashboard;
pub mod derive;
pub mod error;
pub mod favorites;
pub mod model;
pub mod provider;

pub use config::Config;
pub use dashboard::Dashboard;
pub use error::{Result, WeatherError};
pub use favorites::{FavoritesStore, JsonFileStorage};
pub use model::{
    AirQualitySnapshot, ComparisonResult, CurrentConditions, ForecastDay, HistoricalWeather,
    RefreshResult, SavedLocation, WeatherAlert,
};
pub use provider::{ProviderGateway, gateway_from_config};
