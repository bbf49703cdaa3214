//! Host request and response envelopes

use crate::dialog::{SessionState, SlotInput, TurnDirective};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

pub const RESPONSE_VERSION: &str = "1.0";

/// Kinds of request the host sends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestType {
    Launch,
    Intent,
    SessionEnded,
}

impl RequestType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "LaunchRequest" => Some(Self::Launch),
            "IntentRequest" => Some(Self::Intent),
            "SessionEndedRequest" => Some(Self::SessionEnded),
            _ => None,
        }
    }
}

/// Inbound envelope
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub application_id: Option<String>,
    /// Defaults to `IntentRequest`
    #[serde(default)]
    pub request_type: Option<String>,
    pub session_new: bool,
    #[serde(default)]
    pub intent_name: Option<String>,
    #[serde(default)]
    pub slots: HashMap<String, Option<SlotValue>>,
    #[serde(default)]
    pub session: SessionEnvelope,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlotValue {
    #[serde(default)]
    pub value: Option<String>,
}

/// Attributes stay raw until we know the session is continuing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionEnvelope {
    #[serde(default)]
    pub attributes: Value,
}

impl RequestEnvelope {
    pub fn slot_input(&self) -> SlotInput {
        self.slots
            .iter()
            .map(|(name, slot)| (name, slot.as_ref().and_then(|s| s.value.clone())))
            .collect()
    }

    /// Attributes to start the turn from; a new session starts empty and
    /// never looks at what the host sent
    pub fn session_state(&self) -> Result<SessionState, serde_json::Error> {
        if self.session_new || self.session.attributes.is_null() {
            return Ok(SessionState::new());
        }
        SessionState::deserialize(&self.session.attributes)
    }
}

/// Outbound envelope
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub version: &'static str,
    pub session_attributes: SessionState,
    pub response: ResponseBody,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    pub output_speech: OutputSpeech,
    pub card: Card,
    pub reprompt: Reprompt,
    pub should_end_session: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: String,
}

impl OutputSpeech {
    pub fn plain_text(text: impl Into<String>) -> Self {
        Self {
            kind: "PlainText",
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Card {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

impl From<TurnDirective> for ResponseEnvelope {
    fn from(directive: TurnDirective) -> Self {
        Self {
            version: RESPONSE_VERSION,
            session_attributes: directive.session,
            response: ResponseBody {
                output_speech: OutputSpeech::plain_text(directive.speech.clone()),
                card: Card {
                    kind: "Simple",
                    title: directive.card_title,
                    content: directive.speech,
                },
                reprompt: Reprompt {
                    output_speech: OutputSpeech::plain_text(directive.reprompt),
                },
                should_end_session: directive.should_end_session,
            },
        }
    }
}
