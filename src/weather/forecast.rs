//! HTTP forecast client
//!
//! The forecast endpoint reports precipitation probability as a percentage
//! (0-100). It is converted to a [`RainChance`] fraction here, once, so the
//! rest of the crate only ever sees the 0.0-1.0 scale.

use super::{ForecastService, LookupError};
use crate::dialog::{RainChance, ResolvedDate, ResolvedLocation};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;

const SERVICE: &str = "forecast";

/// Queries `GET {base_url}?lat=..&lon=..&begin_date=YYYYMMDD&range=24`
pub struct HttpForecastService {
    client: Client,
    base_url: String,
}

impl HttpForecastService {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn forecast_request(&self, location: &ResolvedLocation, date: &ResolvedDate) -> RequestBuilder {
        let mut query = vec![
            ("lat".to_string(), location.latitude.to_string()),
            ("lon".to_string(), location.longitude.to_string()),
        ];
        query.extend(split_query_fragment(&date.query_param));

        self.client.get(&self.base_url).query(&query)
    }
}

#[async_trait]
impl ForecastService for HttpForecastService {
    async fn rain_chance(
        &self,
        location: &ResolvedLocation,
        date: &ResolvedDate,
    ) -> Result<RainChance, LookupError> {
        let response = self
            .forecast_request(location, date)
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

        parse_forecast(&body)
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    precipitation_probability: Option<f64>,
}

fn parse_forecast(body: &str) -> Result<RainChance, LookupError> {
    let parsed: ForecastResponse = serde_json::from_str(body)
        .map_err(|e| LookupError::decode(format!("Failed to parse forecast response: {e}")))?;

    let percent = parsed
        .precipitation_probability
        .filter(|p| p.is_finite())
        .ok_or_else(|| LookupError::decode("Forecast response has no precipitation probability"))?;

    Ok(RainChance::from_percent(percent))
}

/// `begin_date=20150620&range=24` -> `[("begin_date", "20150620"), ("range", "24")]`
fn split_query_fragment(fragment: &str) -> Vec<(String, String)> {
    fragment
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => (pair.to_string(), String::new()),
        })
        .collect()
}
