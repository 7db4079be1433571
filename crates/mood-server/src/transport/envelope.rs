//! The voice platform's JSON request and response envelopes.
//!
//! Only the fields the journal reads or writes are modelled; everything else
//! in the platform payload is ignored on input and omitted on output.

use std::collections::BTreeMap;

use mood_core::attributes::SessionAttributes;
use mood_core::intents::{ConfirmationStatus, IntentCall};
use mood_core::turn::{Directive, TurnKind, TurnResponse};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct SkillRequest {
    #[serde(default)]
    pub session: Option<Session>,
    #[serde(default)]
    pub context: Option<Context>,
    pub request: RequestBody,
}

#[derive(Debug, Default, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub attributes: Option<Value>,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Deserialize)]
pub struct Context {
    #[serde(rename = "System")]
    pub system: System,
}

#[derive(Debug, Deserialize)]
pub struct System {
    #[serde(default)]
    pub application: Option<Application>,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub application_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum RequestBody {
    LaunchRequest,
    IntentRequest { intent: Intent },
    SessionEndedRequest,
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    pub name: String,
    #[serde(default)]
    pub confirmation_status: Option<String>,
    #[serde(default)]
    pub slots: BTreeMap<String, Slot>,
}

#[derive(Debug, Deserialize)]
pub struct Slot {
    #[serde(default)]
    pub value: Option<String>,
}

impl SkillRequest {
    pub fn application_id(&self) -> Option<&str> {
        self.context
            .as_ref()?
            .system
            .application
            .as_ref()
            .map(|a| a.application_id.as_str())
    }

    /// The linked-account token, from the context or the session.
    pub fn access_token(&self) -> Option<&str> {
        let from_context = self
            .context
            .as_ref()
            .and_then(|c| c.system.user.as_ref())
            .and_then(|u| u.access_token.as_deref());
        let from_session = self
            .session
            .as_ref()
            .and_then(|s| s.user.as_ref())
            .and_then(|u| u.access_token.as_deref());
        from_context
            .or(from_session)
            .filter(|token| !token.trim().is_empty())
    }

    /// Session attributes as echoed by the platform. Unreadable attributes
    /// start a fresh conversation.
    pub fn attributes(&self) -> SessionAttributes {
        let raw = self.session.as_ref().and_then(|s| s.attributes.as_ref());
        SessionAttributes::from_platform(raw).unwrap_or_else(|error| {
            warn!(%error, "unreadable session attributes, starting fresh");
            SessionAttributes::default()
        })
    }

    pub fn turn_kind(&self) -> TurnKind {
        match &self.request {
            RequestBody::LaunchRequest => TurnKind::Launch,
            RequestBody::IntentRequest { intent } => TurnKind::Intent(intent.to_call()),
            RequestBody::SessionEndedRequest | RequestBody::Other => TurnKind::End,
        }
    }
}

impl Intent {
    fn to_call(&self) -> IntentCall {
        let call = IntentCall::new(self.name.as_str()).with_confirmation(
            ConfirmationStatus::from_platform(self.confirmation_status.as_deref()),
        );
        self.slots
            .iter()
            .filter_map(|(name, slot)| slot.value.as_deref().map(|value| (name, value)))
            .fold(call, |call, (name, value)| call.with_slot(name, value))
    }
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillResponse {
    pub version: &'static str,
    pub session_attributes: Value,
    pub response: ResponseBody,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    pub should_end_session: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub directives: Vec<DialogDirective>,
}

#[derive(Debug, Serialize)]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogDirective {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot_to_elicit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_intent: Option<UpdatedIntent>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedIntent {
    pub name: String,
    pub confirmation_status: &'static str,
    pub slots: BTreeMap<String, UpdatedSlot>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedSlot {
    pub name: String,
    pub value: String,
    pub confirmation_status: &'static str,
}

fn plain_text(text: String) -> OutputSpeech {
    OutputSpeech {
        kind: "PlainText",
        text,
    }
}

impl From<&IntentCall> for UpdatedIntent {
    fn from(call: &IntentCall) -> Self {
        Self {
            name: call.name.clone(),
            confirmation_status: call.confirmation.as_platform_str(),
            slots: call
                .slots
                .iter()
                .map(|(name, value)| {
                    (
                        name.clone(),
                        UpdatedSlot {
                            name: name.clone(),
                            value: value.clone(),
                            confirmation_status: ConfirmationStatus::None.as_platform_str(),
                        },
                    )
                })
                .collect(),
        }
    }
}

impl DialogDirective {
    /// Platform form of `directive`. Ending the conversation is a flag on the
    /// response, not a directive, so it maps to `None`.
    fn from_directive(directive: &Directive) -> Option<Self> {
        match directive {
            Directive::ElicitSlot { slot, intent } => Some(Self {
                kind: "Dialog.ElicitSlot",
                slot_to_elicit: Some(slot.clone()),
                updated_intent: intent.as_ref().map(UpdatedIntent::from),
            }),
            Directive::ConfirmIntent { intent } => Some(Self {
                kind: "Dialog.ConfirmIntent",
                slot_to_elicit: None,
                updated_intent: Some(intent.into()),
            }),
            Directive::Delegate { intent } => Some(Self {
                kind: "Dialog.Delegate",
                slot_to_elicit: None,
                updated_intent: Some(intent.into()),
            }),
            Directive::EndConversation => None,
        }
    }
}

impl SkillResponse {
    /// Build the platform envelope for a turn response.
    ///
    /// # Errors
    ///
    /// Fails only if the attributes cannot be serialized.
    pub fn from_turn(turn: TurnResponse) -> Result<Self, mood_core::errors::CoreError> {
        let should_end_session = turn.ends_session();
        let directives = turn
            .directive
            .as_ref()
            .and_then(DialogDirective::from_directive)
            .into_iter()
            .collect();
        let output_speech = (!turn.speech.is_empty()).then(|| plain_text(turn.speech));
        Ok(Self {
            version: "1.0",
            session_attributes: turn.attributes.to_platform()?,
            response: ResponseBody {
                output_speech,
                reprompt: turn.reprompt.map(|text| Reprompt {
                    output_speech: plain_text(text),
                }),
                should_end_session,
                directives,
            },
        })
    }
}
