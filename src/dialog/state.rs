//! Session state carried between turns
//!
//! The host persists [`SessionState`] as the session attribute bag. Each turn
//! receives a snapshot and hands back a new one; nothing here is mutated in
//! place across turns.

use serde::{Deserialize, Serialize};

/// A place the geocoder recognised
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedLocation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A day to forecast, as spoken and as sent to the forecast service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedDate {
    /// "Today", "Tomorrow" or e.g. "Saturday June 20"
    pub display_text: String,
    /// `begin_date=YYYYMMDD&range=24`
    pub query_param: String,
}

/// Slots already resolved in earlier turns of this session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<ResolvedLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<ResolvedDate>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_city(&self, city: ResolvedLocation) -> Self {
        Self {
            city: Some(city),
            date: self.date.clone(),
        }
    }

    #[must_use]
    pub fn with_date(&self, date: ResolvedDate) -> Self {
        Self {
            city: self.city.clone(),
            date: Some(date),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.city.is_none() && self.date.is_none()
    }
}
