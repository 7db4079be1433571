//! Turn entry point: caller resolution, request-type routing, PIN gate.

use mood_config::ResponsesConfig;
use mood_core::attributes::SessionAttributes;
use mood_core::entities::ParticipantLookup;
use mood_core::intents::{IntentCall, IntentName};
use mood_core::turn::{TurnKind, TurnRequest, TurnResponse};
use mood_store::JournalGateway;
use tracing::{debug, info};

use crate::error::TurnError;
use crate::machine::DialogueMachine;
use crate::pin_gate::{self, PinVerdict};

/// Handles turns against one gateway with one response catalogue.
pub struct TurnEngine<G> {
    gateway: G,
    responses: ResponsesConfig,
}

impl<G: JournalGateway> TurnEngine<G> {
    pub const fn new(gateway: G, responses: ResponsesConfig) -> Self {
        Self { gateway, responses }
    }

    pub const fn gateway(&self) -> &G {
        &self.gateway
    }

    pub const fn responses(&self) -> &ResponsesConfig {
        &self.responses
    }

    /// Handle one turn.
    ///
    /// # Errors
    ///
    /// Returns `TurnError::Unauthorized` if the identity token does not
    /// resolve to a participant, and `TurnError::Store` if the lookup itself
    /// fails. Every other failure is spoken in the response.
    pub async fn handle(&self, request: TurnRequest) -> Result<TurnResponse, TurnError> {
        let TurnRequest {
            kind,
            attributes,
            identity_token,
        } = request;

        let participant = match self.gateway.find_participant(&identity_token).await? {
            ParticipantLookup::Found(participant) => participant,
            ParticipantLookup::NotFound => return Err(TurnError::Unauthorized),
        };

        let call = match kind {
            TurnKind::Launch => {
                info!(participant = %participant.id, request = "launch", "turn");
                return Ok(TurnResponse::ask(self.responses.launch.clone(), attributes));
            }
            TurnKind::End => {
                info!(participant = %participant.id, request = "end", "turn");
                return Ok(TurnResponse::tell(String::new(), attributes));
            }
            TurnKind::Intent(call) => call,
        };

        let intent = call.intent();
        info!(
            participant = %participant.id,
            request = "intent",
            intent = intent.as_str(),
            "turn"
        );

        let machine = DialogueMachine {
            gateway: &self.gateway,
            responses: &self.responses,
            token: &identity_token,
        };

        if !pin_gate::admits(intent, &attributes) {
            return Ok(pin_gate::intercept(call, &attributes, &self.responses));
        }
        if intent != IntentName::SetPin {
            return Ok(machine.step(call, attributes).await);
        }

        Ok(self.set_pin(&machine, &call, attributes).await)
    }

    async fn set_pin(
        &self,
        machine: &DialogueMachine<'_, G>,
        call: &IntentCall,
        attributes: SessionAttributes,
    ) -> TurnResponse {
        match pin_gate::verify(machine.gateway, machine.token, call, &attributes).await {
            Ok(PinVerdict::Accepted {
                attributes,
                pending: Some(pending),
            }) => {
                debug!(intent = %pending.name, "replaying held intent");
                machine.step(pending, attributes).await
            }
            Ok(PinVerdict::Accepted {
                attributes,
                pending: None,
            }) => TurnResponse::ask(self.responses.ready.clone(), attributes),
            Ok(PinVerdict::Missing) => {
                pin_gate::elicit_pin(&self.responses.pin_prompt, attributes)
            }
            Err(failure) => machine.render_failure(failure, attributes),
        }
    }
}
