//! Access control in front of every content intent.
//!
//! Without a verified PIN in the attributes, a content intent is parked in
//! `pending_intent` and the caller is asked for the PIN. A correct PIN is
//! written into the attributes and the parked intent is released for replay.

use mood_codec::hash_secret;
use mood_config::ResponsesConfig;
use mood_core::attributes::SessionAttributes;
use mood_core::intents::{IntentCall, IntentName, SLOT_PIN};
use mood_core::turn::{Directive, TurnResponse};
use mood_store::JournalGateway;
use tracing::debug;

use crate::error::DialogueFailure;

/// Whether `intent` may proceed with the given attributes.
pub fn admits(intent: IntentName, attributes: &SessionAttributes) -> bool {
    intent.is_gate_exempt() || attributes.pin().is_some()
}

/// Ask for the PIN on behalf of `call` and park it for replay.
pub fn intercept(
    call: IntentCall,
    attributes: &SessionAttributes,
    responses: &ResponsesConfig,
) -> TurnResponse {
    debug!(intent = %call.name, "intent held until PIN is verified");
    let mut parked = attributes.clone();
    parked.pending_intent = Some(call);
    elicit_pin(&responses.pin_prompt, parked)
}

/// PIN elicitation response, routed back to the PIN-setting intent.
pub fn elicit_pin(speech: &str, attributes: SessionAttributes) -> TurnResponse {
    TurnResponse::ask(speech, attributes).with_directive(Directive::elicit(
        SLOT_PIN,
        Some(IntentCall::of(IntentName::SetPin)),
    ))
}

/// Outcome of a PIN-setting turn that did not fail.
#[derive(Debug)]
pub enum PinVerdict {
    /// PIN accepted. Attributes carry it; `pending` is the parked intent, if any.
    Accepted {
        attributes: SessionAttributes,
        pending: Option<IntentCall>,
    },
    /// The PIN slot was empty.
    Missing,
}

/// Check the PIN slot of `call` against the participant's stored hash.
///
/// A mismatch is [`DialogueFailure::PinMismatch`]; the attributes are left
/// as they were.
pub async fn verify<G: JournalGateway>(
    gateway: &G,
    token: &str,
    call: &IntentCall,
    attributes: &SessionAttributes,
) -> Result<PinVerdict, DialogueFailure> {
    let Some(pin) = call.slot(SLOT_PIN) else {
        return Ok(PinVerdict::Missing);
    };

    if !gateway.check_pin_hash(token, &hash_secret(pin)).await? {
        return Err(DialogueFailure::PinMismatch);
    }

    let mut verified = attributes.clone();
    verified.pin = Some(pin.to_string());
    let pending = verified.pending_intent.take();
    debug!(replay = pending.is_some(), "PIN verified");
    Ok(PinVerdict::Accepted {
        attributes: verified,
        pending,
    })
}
