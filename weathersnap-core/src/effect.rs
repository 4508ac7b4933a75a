//! Effects - side effects declared by the reducer

use crate::model::WeatherRequest;
use crate::notice::Notice;

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Call the weather API
    Fetch(WeatherRequest),
    /// Ask the geolocator for the current position
    Locate,
    /// Show a notice to the user
    Notify(Notice),
}

/// Outcome of one reducer call.
#[derive(Debug, Default, PartialEq)]
pub struct DispatchResult {
    pub changed: bool,
    pub effects: Vec<Effect>,
}

impl DispatchResult {
    pub fn unchanged() -> Self {
        Self::default()
    }

    pub fn changed() -> Self {
        Self {
            changed: true,
            effects: Vec::new(),
        }
    }

    pub fn with(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}
