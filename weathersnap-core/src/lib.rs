//! Core library for the `weathersnap` lookup tool.
//!
//! This crate defines:
//! - The query state machine (reducer, actions, effects) and its controller
//! - The OpenWeather client behind the `WeatherProvider` seam
//! - Geolocation sources and user-facing notices
//! - Configuration & credentials handling
//!
//! It is used by `weathersnap-cli`, but can also be driven by other front ends.

pub mod action;
pub mod config;
pub mod controller;
pub mod effect;
pub mod error;
pub mod geolocation;
pub mod model;
pub mod notice;
pub mod provider;
pub mod reducer;
pub mod state;

pub use config::{Config, GeolocationConfig, GeolocationMode};
pub use controller::WeatherQueryController;
pub use error::{GeolocationError, QueryError};
pub use model::{
    Coordinates, Theme, WeatherObservation, WeatherRequest, derive_theme, display_temperature,
};
pub use notice::{Notice, Severity};
pub use provider::WeatherProvider;
pub use state::{AppState, QueryState};
