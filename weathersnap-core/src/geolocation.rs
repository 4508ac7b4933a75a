use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;

use crate::{
    config::{GeolocationConfig, GeolocationMode},
    error::GeolocationError,
    model::Coordinates,
};

/// IP geolocation endpoint; only the fields we read are requested.
pub const IP_API_URL: &str = "http://ip-api.com/json/?fields=status,message,lat,lon";

/// Source of the device's current position.
#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError>;
}

/// Always answers with the same coordinates.
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocator(pub Coordinates);

#[async_trait]
impl Geolocator for FixedGeolocator {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        Ok(self.0)
    }
}

/// Approximate position from the public IP address.
#[derive(Debug, Clone)]
pub struct IpGeolocator {
    url: String,
    http: Client,
}

impl Default for IpGeolocator {
    fn default() -> Self {
        Self::new(IP_API_URL)
    }
}

impl IpGeolocator {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            http: Client::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

fn coordinates_from_ip_api(body: IpApiResponse) -> Result<Coordinates, GeolocationError> {
    if body.status != "success" {
        return Err(GeolocationError::Denied(
            body.message.unwrap_or_else(|| body.status.clone()),
        ));
    }

    match (body.lat, body.lon) {
        (Some(latitude), Some(longitude)) => Ok(Coordinates {
            latitude,
            longitude,
        }),
        _ => Err(GeolocationError::Denied(
            "response carried no coordinates".to_string(),
        )),
    }
}

#[async_trait]
impl Geolocator for IpGeolocator {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        let res = self.http.get(&self.url).send().await?.error_for_status()?;
        let body: IpApiResponse = res.json().await?;
        coordinates_from_ip_api(body)
    }
}

/// Build the configured geolocator. `None` means geolocation is unavailable.
pub fn geolocator_from_config(config: &GeolocationConfig) -> Option<Box<dyn Geolocator>> {
    match config.mode {
        GeolocationMode::Off => None,
        GeolocationMode::Ip => Some(Box::new(IpGeolocator::default())),
        GeolocationMode::Fixed => match config.coordinates() {
            Some(coords) => Some(Box::new(FixedGeolocator(coords))),
            None => {
                tracing::warn!("geolocation mode is `fixed` but no coordinates are configured");
                None
            }
        },
    }
}
