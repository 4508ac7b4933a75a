//! Text rendering for notices and observations.

use chrono::Local;
use weathersnap_core::{Notice, Theme, WeatherObservation, display_temperature};

pub fn notice_line(notice: &Notice) -> String {
    let marker = if notice.is_destructive() { "✗" } else { "✓" };
    format!("{marker} {notice}")
}

pub fn observation_card(obs: &WeatherObservation, theme: Theme) -> String {
    let mut card = format!(
        "{}, {}\n{}°C  {}\nFeels like {}°C · Humidity {}% · Wind {} m/s\nTheme: {}",
        obs.location_name,
        obs.country,
        display_temperature(obs.temperature_c),
        capitalize(&obs.description),
        display_temperature(obs.feels_like_c),
        obs.humidity_pct,
        display_temperature(obs.wind_speed_mps),
        theme,
    );

    if let Some(at) = obs.observed_at {
        let local = at.with_timezone(&Local);
        card.push_str(&format!(" · observed {}", local.format("%Y-%m-%d %H:%M")));
    }

    card
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
