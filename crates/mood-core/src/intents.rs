//! Intent names, slot keys, and the intent call carried by a turn.
//!
//! Wire names follow the voice platform's interaction model: custom intents use
//! their bare name, built-ins use the `AMAZON.` namespace.

use std::collections::BTreeMap;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const SLOT_NAME: &str = "name";
pub const SLOT_MOOD: &str = "mood";
pub const SLOT_RATING: &str = "rating";
pub const SLOT_ACTIVITY: &str = "activity";
pub const SLOT_PIN: &str = "pin";

// ---------------------------------------------------------------------------
// IntentName
// ---------------------------------------------------------------------------

/// Every intent the dialogue understands. Anything else maps to `Unrecognized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntentName {
    CreateEntry,
    AddActivityToEntry,
    ListEntries,
    ViewEntry,
    DeleteEntry,
    SetPin,
    Yes,
    No,
    Next,
    Previous,
    Cancel,
    Stop,
    Help,
    Unrecognized,
}

impl IntentName {
    /// Parse a wire intent name. Unknown names are `Unrecognized`, never an error.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "CreateEntry" => Self::CreateEntry,
            "AddActivityToEntry" => Self::AddActivityToEntry,
            "ListEntries" => Self::ListEntries,
            "ViewEntry" => Self::ViewEntry,
            "DeleteEntry" => Self::DeleteEntry,
            "SetPin" => Self::SetPin,
            "AMAZON.YesIntent" => Self::Yes,
            "AMAZON.NoIntent" => Self::No,
            "AMAZON.NextIntent" => Self::Next,
            "AMAZON.PreviousIntent" => Self::Previous,
            "AMAZON.CancelIntent" => Self::Cancel,
            "AMAZON.StopIntent" => Self::Stop,
            "AMAZON.HelpIntent" => Self::Help,
            _ => Self::Unrecognized,
        }
    }

    /// Wire name used when the service addresses an intent in a directive.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateEntry => "CreateEntry",
            Self::AddActivityToEntry => "AddActivityToEntry",
            Self::ListEntries => "ListEntries",
            Self::ViewEntry => "ViewEntry",
            Self::DeleteEntry => "DeleteEntry",
            Self::SetPin => "SetPin",
            Self::Yes => "AMAZON.YesIntent",
            Self::No => "AMAZON.NoIntent",
            Self::Next => "AMAZON.NextIntent",
            Self::Previous => "AMAZON.PreviousIntent",
            Self::Cancel => "AMAZON.CancelIntent",
            Self::Stop => "AMAZON.StopIntent",
            Self::Help => "AMAZON.HelpIntent",
            Self::Unrecognized => "AMAZON.FallbackIntent",
        }
    }

    /// Termination intents end the conversation without touching content.
    #[must_use]
    pub const fn is_termination(self) -> bool {
        matches!(self, Self::Cancel | Self::Stop)
    }

    /// Intents that pass the PIN gate without a verified PIN.
    #[must_use]
    pub const fn is_gate_exempt(self) -> bool {
        self.is_termination() || matches!(self, Self::SetPin)
    }
}

impl fmt::Display for IntentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ConfirmationStatus
// ---------------------------------------------------------------------------

/// The platform's confirmation status on an intent (used by `DeleteEntry`).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmationStatus {
    #[default]
    None,
    Confirmed,
    Denied,
}

impl ConfirmationStatus {
    /// Parse the platform's `NONE` / `CONFIRMED` / `DENIED` values.
    /// Missing or unknown values are treated as `None`.
    #[must_use]
    pub fn from_platform(raw: Option<&str>) -> Self {
        match raw.map(str::to_ascii_uppercase).as_deref() {
            Some("CONFIRMED") => Self::Confirmed,
            Some("DENIED") => Self::Denied,
            _ => Self::None,
        }
    }

    #[must_use]
    pub const fn as_platform_str(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Confirmed => "CONFIRMED",
            Self::Denied => "DENIED",
        }
    }
}

// ---------------------------------------------------------------------------
// IntentCall
// ---------------------------------------------------------------------------

/// One invocation of an intent: its wire name, filled slot values, and the
/// platform confirmation status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IntentCall {
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub slots: BTreeMap<String, String>,
    #[serde(default)]
    pub confirmation: ConfirmationStatus,
}

impl IntentCall {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn of(intent: IntentName) -> Self {
        Self::new(intent.as_str())
    }

    #[must_use]
    pub fn with_slot(mut self, slot: &str, value: impl Into<String>) -> Self {
        self.slots.insert(slot.to_string(), value.into());
        self
    }

    #[must_use]
    pub const fn with_confirmation(mut self, confirmation: ConfirmationStatus) -> Self {
        self.confirmation = confirmation;
        self
    }

    #[must_use]
    pub fn intent(&self) -> IntentName {
        IntentName::parse(&self.name)
    }

    /// A filled slot value, trimmed. Empty values count as unfilled.
    #[must_use]
    pub fn slot(&self, slot: &str) -> Option<&str> {
        self.slots
            .get(slot)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }
}
