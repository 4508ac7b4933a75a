use std::collections::VecDeque;

use crate::{
    action::Action,
    effect::Effect,
    geolocation::Geolocator,
    notice::{self, NoticeSender},
    provider::WeatherProvider,
    reducer::reducer,
    state::{AppState, QueryState},
};

/// Owns the query state and runs the effects the reducer asks for.
///
/// `submit_by_name` / `submit_by_location` return once the query has settled.
/// Callers that want to interleave several requests can use [`dispatch`] and
/// [`resolve`] directly; results then apply in whatever order they are fed back.
///
/// [`dispatch`]: WeatherQueryController::dispatch
/// [`resolve`]: WeatherQueryController::resolve
#[derive(Debug)]
pub struct WeatherQueryController {
    state: AppState,
    provider: Box<dyn WeatherProvider>,
    geolocator: Option<Box<dyn Geolocator>>,
    notices: NoticeSender,
}

impl WeatherQueryController {
    pub fn new(
        provider: Box<dyn WeatherProvider>,
        geolocator: Option<Box<dyn Geolocator>>,
        notices: NoticeSender,
    ) -> Self {
        Self {
            state: AppState::new(geolocator.is_some()),
            provider,
            geolocator,
            notices,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn query(&self) -> &QueryState {
        &self.state.query
    }

    pub fn set_city(&mut self, city: impl Into<String>) {
        self.dispatch(Action::CityChange(city.into()));
    }

    /// Apply one action. Notices go out immediately; the async work still to
    /// be done is returned.
    pub fn dispatch(&mut self, action: Action) -> Vec<Effect> {
        let result = reducer(&mut self.state, action);

        result
            .effects
            .into_iter()
            .filter_map(|effect| match effect {
                Effect::Notify(n) => {
                    notice::publish(&self.notices, n);
                    None
                }
                other => Some(other),
            })
            .collect()
    }

    /// Perform one effect and return the action describing its outcome.
    pub async fn resolve(&self, effect: Effect) -> Option<Action> {
        match effect {
            Effect::Fetch(request) => match self.provider.get_weather(&request).await {
                Ok(observation) => Some(Action::WeatherDidLoad {
                    request,
                    observation,
                }),
                Err(err) => Some(Action::WeatherDidError {
                    request,
                    message: format!("{err:#}"),
                }),
            },
            Effect::Locate => {
                let outcome = match &self.geolocator {
                    Some(geolocator) => geolocator
                        .current_position()
                        .await
                        .map_err(|e| e.to_string()),
                    None => Err("no geolocator configured".to_string()),
                };
                Some(match outcome {
                    Ok(coords) => Action::LocationDidResolve(coords),
                    Err(detail) => Action::LocationDidFail(detail),
                })
            }
            Effect::Notify(n) => {
                notice::publish(&self.notices, n);
                None
            }
        }
    }

    /// Dispatch `action` and keep resolving effects until none are left.
    pub async fn run(&mut self, action: Action) -> &QueryState {
        let mut pending: VecDeque<Effect> = self.dispatch(action).into();

        while let Some(effect) = pending.pop_front() {
            if let Some(next) = self.resolve(effect).await {
                pending.extend(self.dispatch(next));
            }
        }

        &self.state.query
    }

    pub async fn submit_by_name(&mut self, name: &str) -> &QueryState {
        self.run(Action::SubmitByName(name.to_string())).await
    }

    pub async fn submit_by_location(&mut self) -> &QueryState {
        self.run(Action::SubmitByLocation).await
    }
}
