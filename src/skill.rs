//! Skill request handling
//!
//! Envelope in, envelope out: verify the caller, pick the request type,
//! hand intent requests to the dialog resolver and render its directive.

mod envelope;

pub use envelope::{RequestEnvelope, RequestType, ResponseEnvelope};

use crate::dialog::{directive, resolve_turn, InvalidIntent, TurnContext, TurnDirective};
use crate::weather::WeatherLookups;
use chrono::NaiveDate;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::Instrument;

/// Faults that end the turn without a spoken response
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SkillError {
    #[error(transparent)]
    InvalidIntent(#[from] InvalidIntent),
    #[error("malformed request envelope: {0}")]
    MalformedEnvelope(String),
    #[error("application id mismatch (expected {expected}, got {})", .actual.as_deref().unwrap_or("none"))]
    ApplicationIdMismatch {
        expected: String,
        actual: Option<String>,
    },
    #[error("unsupported request type: {0}")]
    UnsupportedRequestType(String),
}

/// The umbrella skill: lookups plus the optional application-id check
pub struct Skill {
    lookups: Arc<dyn WeatherLookups>,
    application_id: Option<String>,
}

impl Skill {
    pub fn new(lookups: Arc<dyn WeatherLookups>, application_id: Option<String>) -> Self {
        Self {
            lookups,
            application_id,
        }
    }

    /// Handle one raw request body against the given calendar day
    pub async fn handle(&self, body: Value, today: NaiveDate) -> Result<ResponseEnvelope, SkillError> {
        let envelope: RequestEnvelope = serde_json::from_value(body)
            .map_err(|e| SkillError::MalformedEnvelope(e.to_string()))?;

        let request_id = envelope
            .request_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let span = tracing::info_span!(
            "skill_request",
            request_id = %request_id,
            intent = envelope.intent_name.as_deref().unwrap_or("-"),
        );

        async {
            let result = self.dispatch(&envelope, TurnContext::new(today)).await;
            match &result {
                Ok(response) => tracing::info!(
                    end_session = response.response.should_end_session,
                    "Skill request handled"
                ),
                Err(e) => tracing::warn!(error = %e, "Skill request rejected"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn dispatch(
        &self,
        envelope: &RequestEnvelope,
        ctx: TurnContext,
    ) -> Result<ResponseEnvelope, SkillError> {
        self.verify_application(envelope)?;

        let request_type = match envelope.request_type.as_deref() {
            None => RequestType::Intent,
            Some(name) => RequestType::from_name(name)
                .ok_or_else(|| SkillError::UnsupportedRequestType(name.to_string()))?,
        };
        let session = envelope
            .session_state()
            .map_err(|e| SkillError::MalformedEnvelope(format!("session attributes: {e}")))?;

        let directive = match request_type {
            RequestType::Launch => directive::welcome(session),
            RequestType::SessionEnded => {
                tracing::info!(had_state = !session.is_empty(), "Session ended by host");
                TurnDirective::tell("", session)
            }
            RequestType::Intent => {
                let intent_name = envelope.intent_name.as_deref().ok_or_else(|| {
                    SkillError::MalformedEnvelope("intent request without intentName".to_string())
                })?;
                resolve_turn(
                    &ctx,
                    intent_name,
                    &envelope.slot_input(),
                    &session,
                    self.lookups.as_ref(),
                )
                .await?
            }
        };

        Ok(directive.into())
    }

    fn verify_application(&self, envelope: &RequestEnvelope) -> Result<(), SkillError> {
        let Some(expected) = &self.application_id else {
            return Ok(());
        };
        if envelope.application_id.as_ref() == Some(expected) {
            Ok(())
        } else {
            Err(SkillError::ApplicationIdMismatch {
                expected: expected.clone(),
                actual: envelope.application_id.clone(),
            })
        }
    }
}
