//! The dialogue state machine.
//!
//! Maps (attributes, intent) to (gateway side effects, new attributes, speech,
//! directive). Every handler returns `Result<TurnResponse, DialogueFailure>`;
//! [`DialogueMachine::step`] renders failures so nothing escapes a turn.

use mood_codec::{PinKey, open_entry, seal_entry};
use mood_config::ResponsesConfig;
use mood_core::attributes::{DialogueState, EntryDraft, SessionAttributes};
use mood_core::entities::Entry;
use mood_core::ids::{PREFIX_ENTRY, generate_id};
use mood_core::intents::{
    ConfirmationStatus, IntentCall, IntentName, SLOT_ACTIVITY, SLOT_MOOD, SLOT_NAME, SLOT_RATING,
};
use mood_core::turn::{Directive, TurnResponse};
use mood_store::JournalGateway;
use tracing::{debug, warn};

use crate::error::DialogueFailure;
use crate::narration::describe_entry;
use crate::pagination::{Page, render_page};
use crate::pin_gate;

pub struct DialogueMachine<'a, G> {
    pub gateway: &'a G,
    pub responses: &'a ResponsesConfig,
    pub token: &'a str,
}

impl<G: JournalGateway> DialogueMachine<'_, G> {
    /// Run one intent against the current attributes.
    pub async fn step(&self, call: IntentCall, attributes: SessionAttributes) -> TurnResponse {
        let intent = call.intent();
        debug!(
            intent = intent.as_str(),
            state = attributes.dialogue.last_intent(),
            "dialogue step"
        );

        let outcome = match intent {
            IntentName::CreateEntry => self.create_entry(call, &attributes).await,
            IntentName::AddActivityToEntry => self.add_activity(&call, &attributes),
            IntentName::Yes => self.confirm_more(&attributes),
            IntentName::No => self.finalize_entry(&attributes).await,
            IntentName::ListEntries => self.list_entries(&call, &attributes).await,
            IntentName::Next => self.turn_page(&attributes, PageMove::Forward),
            IntentName::Previous => self.turn_page(&attributes, PageMove::Back),
            IntentName::ViewEntry => self.view_entry(call, &attributes).await,
            IntentName::DeleteEntry => self.delete_entry(call, &attributes).await,
            IntentName::Cancel | IntentName::Stop => {
                Ok(TurnResponse::end(self.responses.goodbye.clone()))
            }
            IntentName::Help => Ok(TurnResponse::ask(
                self.responses.help.clone(),
                attributes.clone(),
            )),
            IntentName::SetPin | IntentName::Unrecognized => {
                Err(DialogueFailure::UnrecognizedIntent)
            }
        };

        outcome.unwrap_or_else(|failure| self.render_failure(failure, attributes))
    }

    /// Speak a failure. Attributes are returned unchanged.
    pub fn render_failure(
        &self,
        failure: DialogueFailure,
        attributes: SessionAttributes,
    ) -> TurnResponse {
        let r = self.responses;
        match failure {
            DialogueFailure::PinMismatch => {
                warn!("PIN mismatch");
                pin_gate::elicit_pin(&r.incorrect_pin, attributes)
            }
            DialogueFailure::MissingContextState | DialogueFailure::UnrecognizedIntent => {
                debug!(%failure, "fallback");
                TurnResponse::ask(r.unknown_request.clone(), attributes)
            }
            DialogueFailure::EntryNotFound => {
                TurnResponse::ask(r.entry_not_found.clone(), attributes)
            }
            DialogueFailure::DuplicateEntryName(carried) => {
                TurnResponse::ask(r.duplicate_name.clone(), attributes)
                    .with_directive(Directive::elicit(SLOT_NAME, Some(carried)))
            }
            DialogueFailure::Persistence(_)
            | DialogueFailure::Unreadable(_)
            | DialogueFailure::Identifier(_) => {
                warn!(%failure, "turn failed");
                TurnResponse::ask(r.failure.clone(), attributes)
            }
        }
    }

    // -----------------------------------------------------------------------
    // Entry construction
    // -----------------------------------------------------------------------

    async fn create_entry(
        &self,
        call: IntentCall,
        attributes: &SessionAttributes,
    ) -> Result<TurnResponse, DialogueFailure> {
        let r = self.responses;
        for (slot, prompt) in [
            (SLOT_NAME, &r.name_prompt),
            (SLOT_MOOD, &r.mood_prompt),
            (SLOT_RATING, &r.rating_prompt),
        ] {
            if call.slot(slot).is_none() {
                return Ok(elicit(prompt, slot, call, attributes));
            }
        }
        let (Some(name), Some(mood), Some(rating)) = (
            call.slot(SLOT_NAME),
            call.slot(SLOT_MOOD),
            call.slot(SLOT_RATING),
        ) else {
            return Err(DialogueFailure::MissingContextState);
        };

        if self.load_entries(attributes).await?.iter().any(|e| e.has_name(name)) {
            let carried = IntentCall::of(IntentName::CreateEntry)
                .with_slot(SLOT_MOOD, mood)
                .with_slot(SLOT_RATING, rating);
            return Err(DialogueFailure::DuplicateEntryName(carried));
        }

        let draft = EntryDraft::new(name, mood, rating);
        Ok(TurnResponse::ask(
            r.first_activity_prompt.clone(),
            attributes.with_dialogue(DialogueState::CreateEntry(draft)),
        ))
    }

    fn add_activity(
        &self,
        call: &IntentCall,
        attributes: &SessionAttributes,
    ) -> Result<TurnResponse, DialogueFailure> {
        let responses = self.responses;
        let mut draft = attributes
            .dialogue
            .draft()
            .cloned()
            .ok_or(DialogueFailure::MissingContextState)?;
        let Some(activity) = call.slot(SLOT_ACTIVITY) else {
            return Ok(elicit(
                &responses.activity_prompt,
                SLOT_ACTIVITY,
                call.clone(),
                attributes,
            ));
        };

        draft.activities.push(activity.to_string());
        Ok(TurnResponse::ask(
            responses.more_activities_prompt.clone(),
            attributes.with_dialogue(DialogueState::AddActivityToEntry(draft)),
        ))
    }

    /// "Yes, there is more": hand control to the activity intent.
    fn confirm_more(&self, attributes: &SessionAttributes) -> Result<TurnResponse, DialogueFailure> {
        if attributes.dialogue.draft().is_none() {
            return Err(DialogueFailure::UnrecognizedIntent);
        }
        Ok(
            TurnResponse::ask(self.responses.activity_prompt.clone(), attributes.clone())
                .with_directive(Directive::delegate(IntentName::AddActivityToEntry)),
        )
    }

    /// "No, that's all": seal and persist the draft.
    async fn finalize_entry(
        &self,
        attributes: &SessionAttributes,
    ) -> Result<TurnResponse, DialogueFailure> {
        let draft = attributes
            .dialogue
            .draft()
            .cloned()
            .ok_or(DialogueFailure::UnrecognizedIntent)?;
        let key = session_key(attributes)?;
        let entry = draft.into_entry(generate_id(PREFIX_ENTRY)?);
        let sealed = seal_entry(&entry, &key)?;

        if let Err(error) = self.gateway.append_entry(self.token, &sealed).await {
            warn!(%error, "entry not persisted, draft kept");
            return Ok(TurnResponse::ask(
                self.responses.entry_create_failed.clone(),
                attributes.clone(),
            ));
        }
        debug!(entry_id = %entry.id, activities = entry.activities.len(), "entry created");
        Ok(TurnResponse::ask(
            self.responses.entry_created.clone(),
            attributes.reset_dialogue(),
        ))
    }

    // -----------------------------------------------------------------------
    // Listing
    // -----------------------------------------------------------------------

    async fn list_entries(
        &self,
        call: &IntentCall,
        attributes: &SessionAttributes,
    ) -> Result<TurnResponse, DialogueFailure> {
        let mut entries = self.load_entries(attributes).await?;
        if let Some(mood) = call.slot(SLOT_MOOD) {
            entries.retain(|e| e.has_mood(mood));
        }
        entries.reverse();

        match render_page(&entries, 1, &self.responses.page_prompt) {
            Page::Rendered { text, page, .. } => Ok(TurnResponse::ask(
                text,
                attributes.with_dialogue(DialogueState::ListEntries { entries, page }),
            )),
            Page::Empty => Ok(TurnResponse::ask(
                self.responses.no_entries.clone(),
                attributes.reset_dialogue(),
            )),
        }
    }

    fn turn_page(
        &self,
        attributes: &SessionAttributes,
        direction: PageMove,
    ) -> Result<TurnResponse, DialogueFailure> {
        let DialogueState::ListEntries { entries, page } = &attributes.dialogue else {
            return Err(DialogueFailure::MissingContextState);
        };
        let target = match direction {
            PageMove::Forward => page.saturating_add(1),
            PageMove::Back => page.saturating_sub(1),
        };

        match render_page(entries, target, &self.responses.page_prompt) {
            Page::Rendered { text, page, .. } => Ok(TurnResponse::ask(
                text,
                attributes.with_dialogue(DialogueState::ListEntries {
                    entries: entries.clone(),
                    page,
                }),
            )),
            Page::Empty => Ok(TurnResponse::ask(
                self.responses.no_more_entries.clone(),
                attributes.clone(),
            )),
        }
    }

    // -----------------------------------------------------------------------
    // Single-entry intents
    // -----------------------------------------------------------------------

    async fn view_entry(
        &self,
        call: IntentCall,
        attributes: &SessionAttributes,
    ) -> Result<TurnResponse, DialogueFailure> {
        let Some(name) = call.slot(SLOT_NAME) else {
            return Ok(elicit(&self.responses.name_prompt, SLOT_NAME, call, attributes));
        };
        let entry = self.find_entry(name, attributes).await?;
        Ok(TurnResponse::ask(
            describe_entry(&entry, self.responses),
            attributes.reset_dialogue(),
        ))
    }

    async fn delete_entry(
        &self,
        call: IntentCall,
        attributes: &SessionAttributes,
    ) -> Result<TurnResponse, DialogueFailure> {
        let r = self.responses;
        let Some(name) = call.slot(SLOT_NAME).map(String::from) else {
            return Ok(elicit(&r.name_prompt, SLOT_NAME, call, attributes));
        };

        match call.confirmation {
            ConfirmationStatus::None => {
                let entry = self.find_entry(&name, attributes).await?;
                Ok(TurnResponse::ask(
                    format!("{} {}?", r.delete_confirm, entry.name),
                    attributes.with_dialogue(DialogueState::DeleteEntry { name: entry.name }),
                )
                .with_directive(Directive::ConfirmIntent { intent: call }))
            }
            ConfirmationStatus::Denied => Ok(TurnResponse::ask(
                r.entry_not_deleted.clone(),
                attributes.reset_dialogue(),
            )),
            ConfirmationStatus::Confirmed => {
                let entry = self.find_entry(&name, attributes).await?;
                match self.gateway.delete_entry(self.token, &entry.id).await {
                    Ok(true) => {
                        debug!(entry_id = %entry.id, "entry deleted");
                        Ok(TurnResponse::ask(
                            r.entry_deleted.clone(),
                            attributes.reset_dialogue(),
                        ))
                    }
                    Ok(false) => {
                        warn!(entry_id = %entry.id, "entry vanished before delete");
                        Ok(TurnResponse::ask(
                            r.entry_delete_failed.clone(),
                            attributes.clone(),
                        ))
                    }
                    Err(error) => {
                        warn!(%error, "entry delete failed");
                        Ok(TurnResponse::ask(
                            r.entry_delete_failed.clone(),
                            attributes.clone(),
                        ))
                    }
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    /// Fetch and open every entry of the caller with the session PIN.
    ///
    /// Entries that do not open are logged and skipped. If none of a
    /// non-empty journal opens, the session PIN is wrong and the first
    /// codec error is returned.
    async fn load_entries(
        &self,
        attributes: &SessionAttributes,
    ) -> Result<Vec<Entry>, DialogueFailure> {
        let key = session_key(attributes)?;
        let sealed = self.gateway.list_entries(self.token).await?;

        let mut entries = Vec::with_capacity(sealed.len());
        let mut first_error = None;
        for item in &sealed {
            match open_entry(item, &key) {
                Ok(entry) => entries.push(entry),
                Err(error) => {
                    warn!(entry_id = %item.id, %error, "skipping unreadable entry");
                    if first_error.is_none() {
                        first_error = Some(error);
                    }
                }
            }
        }

        match first_error {
            Some(error) if entries.is_empty() => Err(error.into()),
            _ => Ok(entries),
        }
    }

    async fn find_entry(
        &self,
        name: &str,
        attributes: &SessionAttributes,
    ) -> Result<Entry, DialogueFailure> {
        self.load_entries(attributes)
            .await?
            .into_iter()
            .find(|e| e.has_name(name))
            .ok_or(DialogueFailure::EntryNotFound)
    }
}

#[derive(Debug, Clone, Copy)]
enum PageMove {
    Forward,
    Back,
}

fn session_key(attributes: &SessionAttributes) -> Result<PinKey, DialogueFailure> {
    attributes
        .pin()
        .map(PinKey::derive)
        .ok_or(DialogueFailure::MissingContextState)
}

fn elicit(
    prompt: &str,
    slot: &str,
    carried: IntentCall,
    attributes: &SessionAttributes,
) -> TurnResponse {
    TurnResponse::ask(prompt, attributes.clone())
        .with_directive(Directive::elicit(slot, Some(carried)))
}
