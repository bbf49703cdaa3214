//! Environment configuration

use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_FORECAST_URL: &str = "http://localhost:8081/forecast";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Settings for the skill server and its outbound lookups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillConfig {
    pub port: u16,
    /// When set, requests must carry this application id
    pub application_id: Option<String>,
    pub geocoder_url: String,
    pub forecast_url: String,
    pub http_timeout: Duration,
    pub user_agent: String,
}

impl SkillConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unparseable numbers fall back to defaults
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        Self {
            port: non_empty("UMBRELLA_PORT")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(DEFAULT_PORT),
            application_id: non_empty("UMBRELLA_APP_ID"),
            geocoder_url: non_empty("UMBRELLA_GEOCODER_URL")
                .unwrap_or_else(|| DEFAULT_GEOCODER_URL.to_string()),
            forecast_url: non_empty("UMBRELLA_FORECAST_URL")
                .unwrap_or_else(|| DEFAULT_FORECAST_URL.to_string()),
            http_timeout: Duration::from_secs(
                non_empty("UMBRELLA_HTTP_TIMEOUT_SECS")
                    .and_then(|t| t.trim().parse().ok())
                    .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),
            ),
            user_agent: non_empty("UMBRELLA_USER_AGENT")
                .unwrap_or_else(|| format!("umbrella-skill/{}", env!("CARGO_PKG_VERSION"))),
        }
    }
}
