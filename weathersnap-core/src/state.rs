//! Query state - single source of truth for what the UI shows

use serde::{Deserialize, Serialize};

use crate::error::QueryError;
use crate::model::{Theme, WeatherObservation};

/// Lifecycle of the current query: Idle → Loading → Success/Failed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum QueryState {
    #[default]
    Idle,
    Loading,
    Success(WeatherObservation),
    Failed(QueryError),
}

impl QueryState {
    pub fn is_idle(&self) -> bool {
        matches!(self, QueryState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, QueryState::Success(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, QueryState::Failed(_))
    }

    pub fn observation(&self) -> Option<&WeatherObservation> {
        match self {
            QueryState::Success(obs) => Some(obs),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<QueryError> {
        match self {
            QueryState::Failed(err) => Some(*err),
            _ => None,
        }
    }
}

/// Everything the UI needs to render
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    /// Text in the city input
    pub city: String,

    pub query: QueryState,

    /// Most recent successful observation; survives later failures
    pub last_observation: Option<WeatherObservation>,

    /// Derived from the condition of the last success
    pub theme: Theme,

    /// Whether "use my location" can work at all
    pub geolocation_available: bool,
}

impl AppState {
    pub fn new(geolocation_available: bool) -> Self {
        Self {
            geolocation_available,
            ..Self::default()
        }
    }
}
