use crate::{Config, WeatherObservation, WeatherRequest, provider::openweather::OpenWeatherProvider};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// The seam between the query controller and the weather HTTP API.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn get_weather(&self, request: &WeatherRequest) -> anyhow::Result<WeatherObservation>;
}

/// Construct the OpenWeather provider from resolved configuration.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured.\n\
             Hint: set WEATHERSNAP_API_KEY or run `weathersnap configure` and enter your key."
        )
    })?;

    let provider = OpenWeatherProvider::new(api_key.to_owned()).with_base_url(config.base_url());

    Ok(Box::new(provider))
}
