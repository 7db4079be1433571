//! Session attributes: the only per-conversation state.
//!
//! The platform echoes this record back on every turn; the service keeps no
//! session map of its own. The dialogue position is a tagged union so that
//! each state carries exactly the fields valid in it.
//!
//! ```text
//! Idle ──CreateEntry──▶ CreateEntry(draft) ──AddActivity──▶ AddActivityToEntry(draft)
//!                          │   ▲                               │   ▲      │
//!                          │   └──────────Yes (delegate)───────┘   └──────┘ AddActivity
//!                          └───────────No (finalize)──────────────────────▶ Idle
//! Idle ──ListEntries──▶ ListEntries{entries,page} ──Next/Previous──▶ ListEntries
//! Idle ──DeleteEntry(none)──▶ DeleteEntry{name} ──DeleteEntry(confirmed|denied)──▶ Idle
//! ```

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Entry;
use crate::errors::CoreError;
use crate::intents::IntentCall;

/// The entry being assembled across turns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EntryDraft {
    pub name: String,
    pub mood: String,
    pub rating: String,
    #[serde(default)]
    pub activities: Vec<String>,
}

impl EntryDraft {
    #[must_use]
    pub fn new(name: &str, mood: &str, rating: &str) -> Self {
        Self {
            name: name.to_string(),
            mood: mood.to_string(),
            rating: rating.to_string(),
            activities: Vec::new(),
        }
    }

    /// Turn the accumulated draft into an entry with the given id.
    #[must_use]
    pub fn into_entry(self, id: String) -> Entry {
        Entry {
            id,
            name: self.name,
            mood: self.mood,
            rating: self.rating,
            activities: self.activities,
        }
    }
}

/// Where the conversation is. Serialized with the tag `lastIntent`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "lastIntent")]
pub enum DialogueState {
    #[default]
    Idle,
    /// Name, mood and rating captured; waiting for the first activity.
    CreateEntry(EntryDraft),
    /// At least one activity added; waiting for another or a yes/no.
    AddActivityToEntry(EntryDraft),
    /// A decrypted listing is cached for next/previous navigation.
    ListEntries { entries: Vec<Entry>, page: u32 },
    /// A delete confirmation has been requested for `name`.
    DeleteEntry { name: String },
}

impl DialogueState {
    /// The `lastIntent` tag of this state.
    #[must_use]
    pub const fn last_intent(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::CreateEntry(_) => "CreateEntry",
            Self::AddActivityToEntry(_) => "AddActivityToEntry",
            Self::ListEntries { .. } => "ListEntries",
            Self::DeleteEntry { .. } => "DeleteEntry",
        }
    }

    /// The entry under construction, if the conversation is building one.
    #[must_use]
    pub const fn draft(&self) -> Option<&EntryDraft> {
        match self {
            Self::CreateEntry(draft) | Self::AddActivityToEntry(draft) => Some(draft),
            _ => None,
        }
    }
}

/// The record the platform carries between turns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionAttributes {
    /// Plaintext PIN, present only once verified in this conversation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin: Option<String>,

    /// The intent intercepted by the PIN gate, replayed after verification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_intent: Option<IntentCall>,

    #[serde(default)]
    pub dialogue: DialogueState,
}

impl SessionAttributes {
    /// Decode the platform's attribute object. `None` and `null` are a fresh
    /// conversation.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidAttributes` if the object does not match the
    /// attribute record.
    pub fn from_platform(value: Option<&serde_json::Value>) -> Result<Self, CoreError> {
        match value {
            None | Some(serde_json::Value::Null) => Ok(Self::default()),
            Some(value) => Ok(Self::deserialize(value)?),
        }
    }

    /// Encode for the platform's `sessionAttributes` field.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidAttributes` if serialization fails.
    pub fn to_platform(&self) -> Result<serde_json::Value, CoreError> {
        Ok(serde_json::to_value(self)?)
    }

    #[must_use]
    pub fn pin(&self) -> Option<&str> {
        self.pin.as_deref()
    }

    /// Same PIN, fresh dialogue. Used whenever a flow completes.
    #[must_use]
    pub fn reset_dialogue(&self) -> Self {
        Self {
            pin: self.pin.clone(),
            pending_intent: None,
            dialogue: DialogueState::Idle,
        }
    }

    #[must_use]
    pub fn with_dialogue(&self, dialogue: DialogueState) -> Self {
        Self {
            pin: self.pin.clone(),
            pending_intent: self.pending_intent.clone(),
            dialogue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intents::{IntentName, SLOT_NAME};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn absent_attributes_are_a_fresh_conversation() {
        assert_eq!(
            SessionAttributes::from_platform(None).unwrap(),
            SessionAttributes::default()
        );
        assert_eq!(
            SessionAttributes::from_platform(Some(&json!(null))).unwrap(),
            SessionAttributes::default()
        );
        assert_eq!(
            SessionAttributes::from_platform(Some(&json!({}))).unwrap(),
            SessionAttributes::default()
        );
    }

    #[test]
    fn dialogue_state_serializes_with_last_intent_tag() {
        let attrs = SessionAttributes {
            pin: Some("1234".into()),
            pending_intent: None,
            dialogue: DialogueState::AddActivityToEntry(EntryDraft {
                name: "run".into(),
                mood: "happy".into(),
                rating: "8".into(),
                activities: vec!["jogging".into()],
            }),
        };

        let value = attrs.to_platform().unwrap();
        assert_eq!(
            value,
            json!({
                "pin": "1234",
                "dialogue": {
                    "lastIntent": "AddActivityToEntry",
                    "name": "run",
                    "mood": "happy",
                    "rating": "8",
                    "activities": ["jogging"]
                }
            })
        );
        assert_eq!(SessionAttributes::from_platform(Some(&value)).unwrap(), attrs);
    }

    #[test]
    fn pending_intent_survives_the_platform() {
        let attrs = SessionAttributes {
            pin: None,
            pending_intent: Some(IntentCall::of(IntentName::ViewEntry).with_slot(SLOT_NAME, "run")),
            dialogue: DialogueState::Idle,
        };
        let value = attrs.to_platform().unwrap();
        assert_eq!(value["pendingIntent"]["name"], "ViewEntry");
        assert_eq!(SessionAttributes::from_platform(Some(&value)).unwrap(), attrs);
    }

    #[test]
    fn unknown_state_tag_is_rejected() {
        let err = SessionAttributes::from_platform(Some(&json!({
            "dialogue": { "lastIntent": "OrderPizza" }
        })))
        .unwrap_err();
        assert!(matches!(err, CoreError::InvalidAttributes(_)));
    }

    #[test]
    fn reset_keeps_only_the_pin() {
        let attrs = SessionAttributes {
            pin: Some("9999".into()),
            pending_intent: Some(IntentCall::of(IntentName::Help)),
            dialogue: DialogueState::DeleteEntry { name: "run".into() },
        };
        let reset = attrs.reset_dialogue();
        assert_eq!(reset.pin(), Some("9999"));
        assert!(reset.pending_intent.is_none());
        assert_eq!(reset.dialogue, DialogueState::Idle);
    }

    #[test]
    fn draft_is_exposed_only_while_building() {
        let draft = EntryDraft::new("run", "happy", "8");
        assert!(DialogueState::CreateEntry(draft.clone()).draft().is_some());
        assert!(DialogueState::AddActivityToEntry(draft).draft().is_some());
        assert!(DialogueState::Idle.draft().is_none());
        assert_eq!(
            DialogueState::ListEntries { entries: vec![], page: 1 }.last_intent(),
            "ListEntries"
        );
    }
}
