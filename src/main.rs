//! Umbrella - voice assistant skill backend
//!
//! Receives intent requests from a voice host, keeps the city/date slots
//! across turns in the session attributes, and answers whether to take an
//! umbrella using an external geocoder and forecast service.

mod api;
mod config;
mod dialog;
mod skill;
mod weather;

use api::{create_router, AppState};
use config::SkillConfig;
use skill::Skill;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use weather::{HttpForecastService, LoggingLookups, NominatimResolver};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "umbrella_skill=info,tower_http=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(false),
        )
        .init();

    let config = SkillConfig::from_env();

    // One HTTP client shared by both lookups
    let client = reqwest::Client::builder()
        .timeout(config.http_timeout)
        .user_agent(config.user_agent.clone())
        .build()?;

    let lookups = LoggingLookups::new(
        Arc::new(NominatimResolver::new(client.clone(), config.geocoder_url.clone())),
        Arc::new(HttpForecastService::new(client, config.forecast_url.clone())),
    );

    if config.application_id.is_none() {
        tracing::warn!("UMBRELLA_APP_ID not set; application id check disabled");
    }
    tracing::info!(
        geocoder = %config.geocoder_url,
        forecast = %config.forecast_url,
        timeout_secs = config.http_timeout.as_secs(),
        "Weather lookups configured"
    );

    let skill = Skill::new(Arc::new(lookups), config.application_id.clone());
    let state = AppState::new(skill);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Umbrella skill listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
