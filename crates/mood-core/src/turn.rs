//! The turn envelope: one request in, one response out.

use crate::attributes::SessionAttributes;
use crate::intents::{IntentCall, IntentName};

/// What kind of turn the platform sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnKind {
    Launch,
    Intent(IntentCall),
    End,
}

/// A normalized inbound turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnRequest {
    pub kind: TurnKind,
    pub attributes: SessionAttributes,
    pub identity_token: String,
}

/// A structured instruction to the platform, distinct from spoken text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Ask the user for `slot`, optionally on behalf of `intent`.
    ElicitSlot {
        slot: String,
        intent: Option<IntentCall>,
    },
    /// Ask the platform to confirm `intent` before it is sent back.
    ConfirmIntent { intent: IntentCall },
    /// Hand dialogue control to `intent`.
    Delegate { intent: IntentCall },
    EndConversation,
}

impl Directive {
    #[must_use]
    pub fn elicit(slot: &str, intent: Option<IntentCall>) -> Self {
        Self::ElicitSlot {
            slot: slot.to_string(),
            intent,
        }
    }

    #[must_use]
    pub fn delegate(intent: IntentName) -> Self {
        Self::Delegate {
            intent: IntentCall::of(intent),
        }
    }
}

/// The outbound turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnResponse {
    pub speech: String,
    pub reprompt: Option<String>,
    pub attributes: SessionAttributes,
    pub directive: Option<Directive>,
}

impl TurnResponse {
    /// Speak and keep the conversation open, reprompting with the same text.
    #[must_use]
    pub fn ask(speech: impl Into<String>, attributes: SessionAttributes) -> Self {
        let speech = speech.into();
        Self {
            reprompt: Some(speech.clone()),
            speech,
            attributes,
            directive: None,
        }
    }

    /// Speak without a reprompt.
    #[must_use]
    pub fn tell(speech: impl Into<String>, attributes: SessionAttributes) -> Self {
        Self {
            speech: speech.into(),
            reprompt: None,
            attributes,
            directive: None,
        }
    }

    /// Speak a closing line and end the conversation. Nothing is retained.
    #[must_use]
    pub fn end(speech: impl Into<String>) -> Self {
        Self {
            speech: speech.into(),
            reprompt: None,
            attributes: SessionAttributes::default(),
            directive: Some(Directive::EndConversation),
        }
    }

    #[must_use]
    pub fn with_directive(mut self, directive: Directive) -> Self {
        self.directive = Some(directive);
        self
    }

    #[must_use]
    pub const fn ends_session(&self) -> bool {
        matches!(self.directive, Some(Directive::EndConversation))
    }
}
