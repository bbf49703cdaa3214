//! Mock lookups for testing
//!
//! Drives the resolver without any network I/O and records every call.

use super::{ForecastService, LocationResolver, LookupError};
use crate::dialog::{RainChance, ResolvedDate, ResolvedLocation};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

pub fn seattle() -> ResolvedLocation {
    ResolvedLocation {
        name: "Seattle".to_string(),
        latitude: 47.6062,
        longitude: -122.3321,
    }
}

pub fn portland() -> ResolvedLocation {
    ResolvedLocation {
        name: "Portland".to_string(),
        latitude: 45.5152,
        longitude: -122.6784,
    }
}

/// Known places (case-insensitive) plus a fixed forecast answer
pub struct MockLookups {
    places: HashMap<String, ResolvedLocation>,
    geocoder_down: bool,
    rain: Option<f64>,
    /// Place names passed to the geocoder
    pub geocoder_calls: Mutex<Vec<String>>,
    /// (city, date query) pairs passed to the forecast service
    pub forecast_calls: Mutex<Vec<(String, String)>>,
}

impl MockLookups {
    /// No known places; forecast reports a 10% chance of rain
    pub fn new() -> Self {
        Self {
            places: HashMap::new(),
            geocoder_down: false,
            rain: Some(0.1),
            geocoder_calls: Mutex::new(Vec::new()),
            forecast_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_city(mut self, location: ResolvedLocation) -> Self {
        self.places.insert(location.name.to_lowercase(), location);
        self
    }

    /// Forecast answers with this fraction (0.0-1.0)
    pub fn with_rain(mut self, fraction: f64) -> Self {
        self.rain = Some(fraction);
        self
    }

    pub fn with_geocoder_down(mut self) -> Self {
        self.geocoder_down = true;
        self
    }

    pub fn with_forecast_down(mut self) -> Self {
        self.rain = None;
        self
    }

    pub fn geocoder_calls(&self) -> Vec<String> {
        self.geocoder_calls.lock().unwrap().clone()
    }

    pub fn forecast_calls(&self) -> Vec<(String, String)> {
        self.forecast_calls.lock().unwrap().clone()
    }
}

impl Default for MockLookups {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LocationResolver for MockLookups {
    async fn resolve_location(&self, place: &str) -> Result<Option<ResolvedLocation>, LookupError> {
        self.geocoder_calls.lock().unwrap().push(place.to_string());
        if self.geocoder_down {
            return Err(LookupError::network("mock geocoder unreachable"));
        }
        Ok(self.places.get(&place.trim().to_lowercase()).cloned())
    }
}

#[async_trait]
impl ForecastService for MockLookups {
    async fn rain_chance(
        &self,
        location: &ResolvedLocation,
        date: &ResolvedDate,
    ) -> Result<RainChance, LookupError> {
        self.forecast_calls
            .lock()
            .unwrap()
            .push((location.name.clone(), date.query_param.clone()));
        self.rain
            .map(RainChance::new)
            .ok_or_else(|| LookupError::status("mock forecast returned HTTP 503"))
    }
}
