//! Nominatim-style geocoding client

use super::{LocationResolver, LookupError};
use crate::dialog::ResolvedLocation;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;

const SERVICE: &str = "geocoder";

/// Resolves place names against a `/search?q=...&format=jsonv2` endpoint
pub struct NominatimResolver {
    client: Client,
    base_url: String,
}

impl NominatimResolver {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn search_request(&self, place: &str) -> RequestBuilder {
        self.client
            .get(&self.base_url)
            .query(&[("q", place), ("format", "jsonv2"), ("limit", "1")])
    }
}

#[async_trait]
impl LocationResolver for NominatimResolver {
    async fn resolve_location(&self, place: &str) -> Result<Option<ResolvedLocation>, LookupError> {
        let response = self
            .search_request(place)
            .send()
            .await
            .map_err(|e| LookupError::from_reqwest(SERVICE, &e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LookupError::from_reqwest(SERVICE, &e))?;

        if !status.is_success() {
            return Err(LookupError::from_status(SERVICE, status, &body));
        }

        parse_search_results(&body, place)
    }
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
}

/// First hit wins; an empty result list is "not found", not an error
fn parse_search_results(body: &str, place: &str) -> Result<Option<ResolvedLocation>, LookupError> {
    let hits: Vec<SearchHit> = serde_json::from_str(body)
        .map_err(|e| LookupError::decode(format!("Failed to parse geocoder response: {e}")))?;

    let Some(hit) = hits.into_iter().next() else {
        return Ok(None);
    };

    let latitude: f64 = hit
        .lat
        .parse()
        .map_err(|_| LookupError::decode(format!("Invalid latitude: {}", hit.lat)))?;
    let longitude: f64 = hit
        .lon
        .parse()
        .map_err(|_| LookupError::decode(format!("Invalid longitude: {}", hit.lon)))?;

    let name = hit
        .name
        .filter(|n| !n.trim().is_empty())
        .or_else(|| {
            hit.display_name
                .as_deref()
                .and_then(|d| d.split(',').next())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        })
        .unwrap_or_else(|| place.trim().to_string());

    Ok(Some(ResolvedLocation {
        name,
        latitude,
        longitude,
    }))
}
