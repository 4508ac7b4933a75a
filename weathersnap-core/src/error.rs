use serde::{Deserialize, Serialize};

/// Why a query attempt did not produce an observation.
///
/// Every variant is final for the attempt; the user retries by submitting again.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryError {
    #[error("please enter a city name")]
    Validation,

    #[error("city not found or network error")]
    Network,

    #[error("geolocation not supported")]
    GeolocationUnavailable,

    #[error("location access denied")]
    GeolocationDenied,
}

/// Failure reported by a [`crate::geolocation::Geolocator`].
#[derive(thiserror::Error, Debug)]
pub enum GeolocationError {
    #[error("location lookup failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("location lookup was refused: {0}")]
    Denied(String),
}
