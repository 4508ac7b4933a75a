//! Reducer - (state, action) -> DispatchResult

use crate::action::Action;
use crate::effect::{DispatchResult, Effect};
use crate::error::QueryError;
use crate::model::WeatherRequest;
use crate::notice::Notice;
use crate::state::{AppState, QueryState};

const ENTER_MANUALLY: &str = "Please enter a city manually";

/// All query state transitions live here.
///
/// Results are applied in the order they arrive, whatever order the requests
/// were issued in.
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult {
    match action {
        Action::CityChange(city) => {
            if state.city == city {
                return DispatchResult::unchanged();
            }
            state.city = city;
            DispatchResult::changed()
        }

        Action::SubmitByName(name) => {
            let name = name.trim();
            if name.is_empty() {
                return DispatchResult::unchanged()
                    .with(Effect::Notify(Notice::destructive("Please enter a city name")));
            }

            state.city = name.to_string();
            state.query = QueryState::Loading;
            DispatchResult::changed().with(Effect::Fetch(WeatherRequest::ByName(name.to_string())))
        }

        Action::SubmitByLocation => {
            if !state.geolocation_available {
                return DispatchResult::unchanged().with(Effect::Notify(
                    Notice::destructive("Geolocation not supported").with_description(ENTER_MANUALLY),
                ));
            }

            state.query = QueryState::Loading;
            DispatchResult::changed().with(Effect::Locate)
        }

        Action::LocationDidResolve(coords) => {
            tracing::debug!(%coords, "position acquired");
            DispatchResult::unchanged().with(Effect::Fetch(WeatherRequest::ByCoordinates(coords)))
        }

        Action::LocationDidFail(detail) => {
            tracing::warn!(%detail, "geolocation failed");
            state.query = QueryState::Failed(QueryError::GeolocationDenied);
            DispatchResult::changed().with(Effect::Notify(
                Notice::destructive("Location access denied").with_description(ENTER_MANUALLY),
            ))
        }

        Action::WeatherDidLoad {
            request,
            observation,
        } => {
            let title = if request.is_by_coordinates() {
                state.city = observation.location_name.clone();
                "Location detected!"
            } else {
                "Weather updated!"
            };
            let notice = Notice::normal(title).with_description(format!(
                "Showing weather for {}",
                observation.location_name
            ));

            state.theme = observation.theme();
            state.last_observation = Some(observation.clone());
            state.query = QueryState::Success(observation);
            DispatchResult::changed().with(Effect::Notify(notice))
        }

        Action::WeatherDidError { request, message } => {
            tracing::warn!(?request, error = %message, "weather request failed");
            let notice = if request.is_by_coordinates() {
                Notice::destructive("Error getting location weather")
                    .with_description("Please try searching manually")
            } else {
                Notice::destructive("Error fetching weather")
                    .with_description("Please check the city name and try again")
            };

            state.query = QueryState::Failed(QueryError::Network);
            DispatchResult::changed().with(Effect::Notify(notice))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Coordinates, Theme, WeatherObservation};
    use crate::notice::Severity;

    fn observation(name: &str, condition: &str) -> WeatherObservation {
        WeatherObservation {
            location_name: name.into(),
            country: "NO".into(),
            temperature_c: 21.7,
            feels_like_c: 20.9,
            humidity_pct: 55,
            condition: condition.into(),
            description: "clear sky".into(),
            wind_speed_mps: 3.4,
            observed_at: None,
        }
    }

    fn notices(result: &DispatchResult) -> Vec<&Notice> {
        result
            .effects
            .iter()
            .filter_map(|e| match e {
                Effect::Notify(n) => Some(n),
                _ => None,
            })
            .collect()
    }

    const HERE: Coordinates = Coordinates {
        latitude: 59.91,
        longitude: 10.75,
    };

    #[test]
    fn submit_by_name_sets_loading_and_fetches() {
        let mut state = AppState::default();

        let result = reducer(&mut state, Action::SubmitByName("  Oslo ".into()));

        assert!(result.changed);
        assert!(state.query.is_loading());
        assert_eq!(state.city, "Oslo");
        assert_eq!(
            result.effects,
            vec![Effect::Fetch(WeatherRequest::ByName("Oslo".into()))]
        );
    }

    #[test]
    fn blank_name_only_notifies() {
        for input in ["", "   ", "\t\n"] {
            let mut state = AppState {
                query: QueryState::Success(observation("Oslo", "Clear")),
                ..AppState::default()
            };
            let before = state.clone();

            let result = reducer(&mut state, Action::SubmitByName(input.into()));

            assert!(!result.changed);
            assert_eq!(state, before);
            let notices = notices(&result);
            assert_eq!(notices.len(), 1);
            assert_eq!(notices[0].title, "Please enter a city name");
            assert_eq!(notices[0].severity, Severity::Destructive);
            assert!(!result.effects.iter().any(|e| matches!(e, Effect::Fetch(_))));
        }
    }

    #[test]
    fn location_unavailable_only_notifies() {
        let mut state = AppState::new(false);

        let result = reducer(&mut state, Action::SubmitByLocation);

        assert!(!result.changed);
        assert!(state.query.is_idle());
        let notices = notices(&result);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].title, "Geolocation not supported");
        assert_eq!(notices[0].description.as_deref(), Some(ENTER_MANUALLY));
    }

    #[test]
    fn location_flow_fetches_by_coordinates() {
        let mut state = AppState::new(true);

        let result = reducer(&mut state, Action::SubmitByLocation);
        assert!(state.query.is_loading());
        assert_eq!(result.effects, vec![Effect::Locate]);

        let result = reducer(&mut state, Action::LocationDidResolve(HERE));
        assert!(state.query.is_loading());
        assert_eq!(
            result.effects,
            vec![Effect::Fetch(WeatherRequest::ByCoordinates(HERE))]
        );
    }

    #[test]
    fn location_denied_keeps_city() {
        let mut state = AppState {
            city: "Bergen".into(),
            ..AppState::new(true)
        };
        reducer(&mut state, Action::SubmitByLocation);

        let result = reducer(&mut state, Action::LocationDidFail("denied".into()));

        assert_eq!(state.query, QueryState::Failed(QueryError::GeolocationDenied));
        assert_eq!(state.city, "Bergen");
        let notices = notices(&result);
        assert_eq!(notices[0].title, "Location access denied");
        assert_eq!(notices[0].description.as_deref(), Some(ENTER_MANUALLY));
    }

    #[test]
    fn load_by_name_sets_success_and_theme() {
        let mut state = AppState::default();
        reducer(&mut state, Action::SubmitByName("Oslo".into()));

        let obs = observation("Oslo", "Clouds");
        let result = reducer(
            &mut state,
            Action::WeatherDidLoad {
                request: WeatherRequest::ByName("Oslo".into()),
                observation: obs.clone(),
            },
        );

        assert_eq!(state.query, QueryState::Success(obs.clone()));
        assert_eq!(state.last_observation, Some(obs));
        assert_eq!(state.theme, Theme::Cloudy);
        let notices = notices(&result);
        assert_eq!(notices[0].title, "Weather updated!");
        assert_eq!(
            notices[0].description.as_deref(),
            Some("Showing weather for Oslo")
        );
        assert_eq!(notices[0].severity, Severity::Normal);
    }

    #[test]
    fn load_by_coordinates_updates_city() {
        let mut state = AppState {
            city: "typed text".into(),
            ..AppState::new(true)
        };

        let result = reducer(
            &mut state,
            Action::WeatherDidLoad {
                request: WeatherRequest::ByCoordinates(HERE),
                observation: observation("Oslo", "Snow"),
            },
        );

        assert_eq!(state.city, "Oslo");
        assert_eq!(state.theme, Theme::Snowy);
        assert_eq!(notices(&result)[0].title, "Location detected!");
    }

    #[test]
    fn error_keeps_last_observation_and_theme() {
        let obs = observation("Oslo", "Rain");
        let mut state = AppState {
            query: QueryState::Loading,
            last_observation: Some(obs.clone()),
            theme: Theme::Rainy,
            ..AppState::default()
        };

        let result = reducer(
            &mut state,
            Action::WeatherDidError {
                request: WeatherRequest::ByName("Nowhere".into()),
                message: "404".into(),
            },
        );

        assert_eq!(state.query, QueryState::Failed(QueryError::Network));
        assert_eq!(state.last_observation, Some(obs));
        assert_eq!(state.theme, Theme::Rainy);
        let notices = notices(&result);
        assert_eq!(notices[0].title, "Error fetching weather");
        assert_eq!(
            notices[0].description.as_deref(),
            Some("Please check the city name and try again")
        );
    }

    #[test]
    fn location_weather_error_suggests_manual_search() {
        let mut state = AppState::new(true);

        let result = reducer(
            &mut state,
            Action::WeatherDidError {
                request: WeatherRequest::ByCoordinates(HERE),
                message: "timeout".into(),
            },
        );

        assert!(state.query.is_failed());
        assert_eq!(notices(&result)[0].title, "Error getting location weather");
    }

    #[test]
    fn success_and_failure_reenter_loading() {
        let mut state = AppState {
            query: QueryState::Failed(QueryError::Network),
            ..AppState::default()
        };
        reducer(&mut state, Action::SubmitByName("Oslo".into()));
        assert!(state.query.is_loading());

        state.query = QueryState::Success(observation("Oslo", "Clear"));
        reducer(&mut state, Action::SubmitByName("Bergen".into()));
        assert!(state.query.is_loading());
    }

    #[test]
    fn city_change() {
        let mut state = AppState::default();
        assert!(reducer(&mut state, Action::CityChange("Os".into())).changed);
        assert!(!reducer(&mut state, Action::CityChange("Os".into())).changed);
        assert_eq!(state.city, "Os");
    }
}
