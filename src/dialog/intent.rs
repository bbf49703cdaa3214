//! Intent dispatch and slot input

use std::collections::HashMap;
use thiserror::Error;

pub const CITY_SLOT: &str = "City";
/// The one-shot utterance model names its city slot `location`
pub const CITY_SLOT_ALIAS: &str = "Location";
pub const DATE_SLOT: &str = "Date";

/// Intent classes the resolver knows how to handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// City and/or date in a single utterance
    OneShot,
    /// One slot per turn, filled across several turns
    Dialog,
    SupportedCities,
    Help,
    Stop,
}

/// Intent name -> class. Names not listed here are rejected.
const DISPATCH_TABLE: &[(&str, Intent)] = &[
    ("OneshotUmbrellaIntent", Intent::OneShot),
    ("DialogUmbrellaIntent", Intent::Dialog),
    ("SupportedCitiesIntent", Intent::SupportedCities),
    ("AMAZON.HelpIntent", Intent::Help),
    ("AMAZON.StopIntent", Intent::Stop),
    ("AMAZON.CancelIntent", Intent::Stop),
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized intent: {0}")]
pub struct InvalidIntent(pub String);

impl Intent {
    pub fn from_name(name: &str) -> Result<Self, InvalidIntent> {
        DISPATCH_TABLE
            .iter()
            .find(|(known, _)| *known == name)
            .map(|(_, intent)| *intent)
            .ok_or_else(|| InvalidIntent(name.to_string()))
    }
}

/// Raw slot values for one turn, keyed case-insensitively
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotInput {
    values: HashMap<String, Option<String>>,
}

impl SlotInput {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.insert(name, Some(value.into()));
        self
    }

    pub fn insert(&mut self, name: &str, value: Option<String>) {
        self.values.insert(name.to_ascii_lowercase(), value);
    }

    /// Trimmed value; absent, null and blank all read as `None`
    pub fn value(&self, name: &str) -> Option<&str> {
        self.values
            .get(&name.to_ascii_lowercase())
            .and_then(Option::as_deref)
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    pub fn city(&self) -> Option<&str> {
        self.value(CITY_SLOT).or_else(|| self.value(CITY_SLOT_ALIAS))
    }

    pub fn date(&self) -> Option<&str> {
        self.value(DATE_SLOT)
    }
}

impl<K: AsRef<str>> FromIterator<(K, Option<String>)> for SlotInput {
    fn from_iter<I: IntoIterator<Item = (K, Option<String>)>>(iter: I) -> Self {
        let mut slots = SlotInput::new();
        for (name, value) in iter {
            slots.insert(name.as_ref(), value);
        }
        slots
    }
}
