//! HTTP request handlers

use super::types::{ErrorResponse, HealthResponse};
use super::AppState;
use crate::skill::{ResponseEnvelope, SkillError};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Local;
use serde_json::Value;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Skill requests from the voice host
        .route("/skill", post(handle_skill))
        .route("/health", get(health))
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Skill
// ============================================================

async fn handle_skill(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<ResponseEnvelope>, AppError> {
    let today = Local::now().date_naive();
    let response = state.skill.handle(body, today).await?;
    Ok(Json(response))
}

// ============================================================
// Probes
// ============================================================

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// ============================================================
// Errors
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    Forbidden(String),
}

impl From<SkillError> for AppError {
    fn from(err: SkillError) -> Self {
        match err {
            SkillError::ApplicationIdMismatch { .. } => AppError::Forbidden(err.to_string()),
            SkillError::InvalidIntent(_)
            | SkillError::MalformedEnvelope(_)
            | SkillError::UnsupportedRequestType(_) => AppError::BadRequest(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
