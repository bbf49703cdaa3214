//! External weather collaborators
//!
//! Two lookups sit behind async traits so the dialog resolver can be driven
//! by HTTP clients in production and by mocks in tests:
//! - [`LocationResolver`] turns a spoken place name into coordinates
//! - [`ForecastService`] returns the chance of rain for a place and day

mod error;
mod forecast;
mod geocoding;
#[cfg(test)]
pub mod testing;

pub use error::LookupError;
#[cfg(test)]
pub use error::LookupErrorKind;
pub use forecast::HttpForecastService;
pub use geocoding::NominatimResolver;

use crate::dialog::{RainChance, ResolvedDate, ResolvedLocation};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

/// Free-text place name to coordinates, first result wins
#[async_trait]
pub trait LocationResolver: Send + Sync {
    /// `Ok(None)` means the service answered but knows no such place
    async fn resolve_location(&self, place: &str) -> Result<Option<ResolvedLocation>, LookupError>;
}

/// Precipitation forecast for a resolved place and day
#[async_trait]
pub trait ForecastService: Send + Sync {
    async fn rain_chance(
        &self,
        location: &ResolvedLocation,
        date: &ResolvedDate,
    ) -> Result<RainChance, LookupError>;
}

/// Both lookups, as the resolver needs them
pub trait WeatherLookups: LocationResolver + ForecastService {}
impl<T: LocationResolver + ForecastService + ?Sized> WeatherLookups for T {}

#[async_trait]
impl<T: LocationResolver + ?Sized> LocationResolver for Arc<T> {
    async fn resolve_location(&self, place: &str) -> Result<Option<ResolvedLocation>, LookupError> {
        (**self).resolve_location(place).await
    }
}

#[async_trait]
impl<T: ForecastService + ?Sized> ForecastService for Arc<T> {
    async fn rain_chance(
        &self,
        location: &ResolvedLocation,
        date: &ResolvedDate,
    ) -> Result<RainChance, LookupError> {
        (**self).rain_chance(location, date).await
    }
}

/// Logging wrapper pairing a location resolver with a forecast service
pub struct LoggingLookups {
    geocoder: Arc<dyn LocationResolver>,
    forecast: Arc<dyn ForecastService>,
}

impl LoggingLookups {
    pub fn new(geocoder: Arc<dyn LocationResolver>, forecast: Arc<dyn ForecastService>) -> Self {
        Self { geocoder, forecast }
    }
}

#[async_trait]
impl LocationResolver for LoggingLookups {
    async fn resolve_location(&self, place: &str) -> Result<Option<ResolvedLocation>, LookupError> {
        let start = Instant::now();
        let result = self.geocoder.resolve_location(place).await;
        let duration = start.elapsed();

        match &result {
            Ok(Some(location)) => {
                tracing::info!(
                    place = %place,
                    resolved = %location.name,
                    duration_ms = %duration.as_millis(),
                    "Location resolved"
                );
            }
            Ok(None) => {
                tracing::info!(
                    place = %place,
                    duration_ms = %duration.as_millis(),
                    "Location not found"
                );
            }
            Err(e) => {
                tracing::error!(
                    place = %place,
                    duration_ms = %duration.as_millis(),
                    kind = e.kind.as_str(),
                    error = %e.message,
                    "Location lookup failed"
                );
            }
        }

        result
    }
}

#[async_trait]
impl ForecastService for LoggingLookups {
    async fn rain_chance(
        &self,
        location: &ResolvedLocation,
        date: &ResolvedDate,
    ) -> Result<RainChance, LookupError> {
        let start = Instant::now();
        let result = self.forecast.rain_chance(location, date).await;
        let duration = start.elapsed();

        match &result {
            Ok(chance) => {
                tracing::info!(
                    city = %location.name,
                    date = %date.query_param,
                    rain_percent = chance.percent(),
                    duration_ms = %duration.as_millis(),
                    "Forecast retrieved"
                );
            }
            Err(e) => {
                tracing::error!(
                    city = %location.name,
                    date = %date.query_param,
                    duration_ms = %duration.as_millis(),
                    kind = e.kind.as_str(),
                    error = %e.message,
                    "Forecast lookup failed"
                );
            }
        }

        result
    }
}
