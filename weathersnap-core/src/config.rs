use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::{model::Coordinates, provider::openweather::DEFAULT_BASE_URL};

pub const API_KEY_ENV: &str = "WEATHERSNAP_API_KEY";
pub const BASE_URL_ENV: &str = "WEATHERSNAP_BASE_URL";

/// How the "use my location" action finds coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeolocationMode {
    /// Look the position up from the public IP address.
    #[default]
    Ip,
    /// Use the configured latitude/longitude.
    Fixed,
    /// Geolocation is unavailable.
    Off,
}

impl GeolocationMode {
    pub const fn all() -> &'static [GeolocationMode] {
        &[GeolocationMode::Ip, GeolocationMode::Fixed, GeolocationMode::Off]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GeolocationMode::Ip => "ip",
            GeolocationMode::Fixed => "fixed",
            GeolocationMode::Off => "off",
        }
    }
}

impl std::fmt::Display for GeolocationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for GeolocationMode {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "ip" => Ok(GeolocationMode::Ip),
            "fixed" => Ok(GeolocationMode::Fixed),
            "off" => Ok(GeolocationMode::Off),
            _ => Err(anyhow!(
                "Unknown geolocation mode '{value}'. Supported modes: ip, fixed, off."
            )),
        }
    }
}

/// Example TOML:
/// [geolocation]
/// mode = "fixed"
/// latitude = 59.91
/// longitude = 10.75
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeolocationConfig {
    #[serde(default)]
    pub mode: GeolocationMode,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl GeolocationConfig {
    pub fn fixed(coords: Coordinates) -> Self {
        Self {
            mode: GeolocationMode::Fixed,
            latitude: Some(coords.latitude),
            longitude: Some(coords.longitude),
        }
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        Some(Coordinates {
            latitude: self.latitude?,
            longitude: self.longitude?,
        })
    }
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// OpenWeatherMap API key.
    pub api_key: Option<String>,

    /// Override for the current-weather endpoint.
    pub base_url: Option<String>,

    #[serde(default)]
    pub geolocation: GeolocationConfig,
}

impl Config {
    /// API key, ignoring blank values.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_BASE_URL)
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(path)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weathersnap", "weathersnap")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Apply environment overrides. `lookup` is usually `std::env::var(..).ok()`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_ENV).filter(|v| !v.trim().is_empty()) {
            tracing::debug!("API key taken from {API_KEY_ENV}");
            self.api_key = Some(key);
        }
        if let Some(url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            tracing::debug!(%url, "base URL taken from {BASE_URL_ENV}");
            self.base_url = Some(url);
        }
    }

    /// Load from disk and apply the process environment.
    pub fn resolve() -> Result<Self> {
        let mut cfg = Self::load()?;
        cfg.apply_env(|name| std::env::var(name).ok());
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.api_key(), None);
        assert_eq!(cfg.base_url(), DEFAULT_BASE_URL);
        assert_eq!(cfg.geolocation.mode, GeolocationMode::Ip);
    }

    #[test]
    fn parses_full_toml() {
        let cfg = Config::from_toml(
            r#"
            api_key = "abc123"
            base_url = "http://localhost:8080/weather"

            [geolocation]
            mode = "fixed"
            latitude = 59.91
            longitude = 10.75
            "#,
        )
        .expect("valid toml");

        assert_eq!(cfg.api_key(), Some("abc123"));
        assert_eq!(cfg.base_url(), "http://localhost:8080/weather");
        assert_eq!(cfg.geolocation.mode, GeolocationMode::Fixed);
        assert_eq!(
            cfg.geolocation.coordinates(),
            Some(Coordinates {
                latitude: 59.91,
                longitude: 10.75
            })
        );
    }

    #[test]
    fn empty_toml_is_default() {
        let cfg = Config::from_toml("").expect("empty toml");
        assert_eq!(cfg.api_key(), None);
        assert_eq!(cfg.geolocation, GeolocationConfig::default());
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(Config::from_toml("[geolocation]\nmode = \"gps\"").is_err());
        assert!(GeolocationMode::try_from("gps").is_err());
    }

    #[test]
    fn mode_as_str_roundtrip() {
        for mode in GeolocationMode::all() {
            let parsed = GeolocationMode::try_from(mode.as_str()).expect("roundtrip");
            assert_eq!(*mode, parsed);
        }
    }

    #[test]
    fn env_overrides_file_values() {
        let mut cfg = Config {
            api_key: Some("from-file".into()),
            ..Config::default()
        };

        cfg.apply_env(env(&[
            (API_KEY_ENV, "from-env"),
            (BASE_URL_ENV, "http://proxy/weather"),
        ]));

        assert_eq!(cfg.api_key(), Some("from-env"));
        assert_eq!(cfg.base_url(), "http://proxy/weather");
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let mut cfg = Config {
            api_key: Some("from-file".into()),
            ..Config::default()
        };

        cfg.apply_env(env(&[(API_KEY_ENV, "  "), (BASE_URL_ENV, "")]));

        assert_eq!(cfg.api_key(), Some("from-file"));
        assert_eq!(cfg.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn missing_file_loads_default() {
        let path = std::env::temp_dir().join("weathersnap-test-does-not-exist/config.toml");
        let cfg = Config::load_from(&path).expect("missing file is fine");
        assert_eq!(cfg.api_key(), None);
    }

    #[test]
    fn fixed_geolocation_config() {
        let geo = GeolocationConfig::fixed(Coordinates {
            latitude: 1.5,
            longitude: -2.5,
        });
        assert_eq!(geo.mode, GeolocationMode::Fixed);
        assert_eq!(geo.latitude, Some(1.5));
        assert_eq!(geo.longitude, Some(-2.5));
    }
}
