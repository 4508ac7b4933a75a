use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A point on the globe, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// What to look up. Both variants go through the same request builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WeatherRequest {
    ByName(String),
    ByCoordinates(Coordinates),
}

impl WeatherRequest {
    pub fn is_by_coordinates(&self) -> bool {
        matches!(self, WeatherRequest::ByCoordinates(_))
    }
}

/// Result of one successful weather query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub location_name: String,
    pub country: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    /// Short category such as "Clear" or "Rain".
    pub condition: String,
    pub description: String,
    pub wind_speed_mps: f64,
    pub observed_at: Option<DateTime<Utc>>,
}

impl WeatherObservation {
    pub fn theme(&self) -> Theme {
        derive_theme(&self.condition)
    }
}

/// Background theme picked from the condition category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Theme {
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
    #[default]
    Default,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Sunny => "sunny",
            Theme::Cloudy => "cloudy",
            Theme::Rainy => "rainy",
            Theme::Snowy => "snowy",
            Theme::Default => "default",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a condition category to a theme.
///
/// Checks run in a fixed order and the first hit wins, so "cloud" is tested
/// before "rain": "Cloudy with rain" is `Cloudy`.
pub fn derive_theme(condition: &str) -> Theme {
    let condition = condition.to_lowercase();

    if condition.contains("clear") || condition.contains("sun") {
        Theme::Sunny
    } else if condition.contains("cloud") {
        Theme::Cloudy
    } else if condition.contains("rain") || condition.contains("drizzle") {
        Theme::Rainy
    } else if condition.contains("snow") {
        Theme::Snowy
    } else {
        Theme::Default
    }
}

/// Round for display, halves going up (`21.5 -> 22`, `-2.5 -> -2`).
///
/// Never produces negative zero.
pub fn display_temperature(value: f64) -> i64 {
    // `value + 0.5` would round up just below one half.
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded as i64
}
