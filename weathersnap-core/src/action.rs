//! Actions: user intents and async results

use crate::model::{Coordinates, WeatherObservation, WeatherRequest};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ===== Input =====
    /// City input text changed
    CityChange(String),

    /// Intent: look up weather for a city name
    SubmitByName(String),

    /// Intent: look up weather for the device position
    SubmitByLocation,

    // ===== Geolocation results =====
    LocationDidResolve(Coordinates),

    /// Position could not be obtained; carries detail for the log only
    LocationDidFail(String),

    // ===== Weather results =====
    WeatherDidLoad {
        request: WeatherRequest,
        observation: WeatherObservation,
    },

    /// Carries detail for the log only
    WeatherDidError {
        request: WeatherRequest,
        message: String,
    },
}
