//! Multi-turn conversations driven through `TurnEngine` against an in-memory
//! gateway. Attributes from each response are fed into the next request, the
//! way the voice platform echoes them.

use mood_codec::{PinKey, hash_secret, open_entry, seal_entry};
use mood_config::ResponsesConfig;
use mood_core::attributes::{DialogueState, EntryDraft, SessionAttributes};
use mood_core::entities::{Entry, SealedEntry};
use mood_core::intents::{
    ConfirmationStatus, IntentCall, IntentName, SLOT_ACTIVITY, SLOT_MOOD, SLOT_NAME, SLOT_PIN,
    SLOT_RATING,
};
use mood_core::turn::{Directive, TurnKind, TurnRequest, TurnResponse};
use mood_dialogue::{TurnEngine, TurnError};
use mood_store::{JournalGateway, MemoryGateway};
use pretty_assertions::assert_eq;
use rstest::rstest;

const TOKEN: &str = "token-123";
const PIN: &str = "1234";

async fn engine() -> TurnEngine<MemoryGateway> {
    let gateway = MemoryGateway::new();
    gateway
        .register_participant(TOKEN, &hash_secret(PIN))
        .await
        .unwrap();
    TurnEngine::new(gateway, ResponsesConfig::default())
}

fn unlocked() -> SessionAttributes {
    SessionAttributes {
        pin: Some(PIN.into()),
        ..SessionAttributes::default()
    }
}

async fn say(
    engine: &TurnEngine<MemoryGateway>,
    call: IntentCall,
    attributes: SessionAttributes,
) -> TurnResponse {
    engine
        .handle(TurnRequest {
            kind: TurnKind::Intent(call),
            attributes,
            identity_token: TOKEN.into(),
        })
        .await
        .unwrap()
}

async fn stored(engine: &TurnEngine<MemoryGateway>) -> Vec<SealedEntry> {
    engine.gateway().list_entries(TOKEN).await.unwrap()
}

async fn opened(engine: &TurnEngine<MemoryGateway>) -> Vec<Entry> {
    let key = PinKey::derive(PIN);
    stored(engine)
        .await
        .iter()
        .map(|sealed| open_entry(sealed, &key).unwrap())
        .collect()
}

async fn seed(engine: &TurnEngine<MemoryGateway>, names: &[&str]) {
    let key = PinKey::derive(PIN);
    for (i, name) in names.iter().enumerate() {
        let entry = Entry {
            id: format!("ent-{i:08x}"),
            name: (*name).into(),
            mood: if i % 2 == 0 { "happy" } else { "sad" }.into(),
            rating: format!("{}", i + 1),
            activities: vec![],
        };
        engine
            .gateway()
            .append_entry(TOKEN, &seal_entry(&entry, &key).unwrap())
            .await
            .unwrap();
    }
}

fn create(name: &str, mood: &str, rating: &str) -> IntentCall {
    IntentCall::of(IntentName::CreateEntry)
        .with_slot(SLOT_NAME, name)
        .with_slot(SLOT_MOOD, mood)
        .with_slot(SLOT_RATING, rating)
}

fn activity(what: &str) -> IntentCall {
    IntentCall::of(IntentName::AddActivityToEntry).with_slot(SLOT_ACTIVITY, what)
}

fn delete(name: &str, status: ConfirmationStatus) -> IntentCall {
    IntentCall::of(IntentName::DeleteEntry)
        .with_slot(SLOT_NAME, name)
        .with_confirmation(status)
}

// ---------------------------------------------------------------------------
// Entry creation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn full_creation_flow_persists_activities_in_order() {
    let engine = engine().await;

    let r = say(&engine, create("run", "happy", "8"), unlocked()).await;
    assert_eq!(r.speech, engine.responses().first_activity_prompt);
    assert_eq!(
        r.attributes.dialogue,
        DialogueState::CreateEntry(EntryDraft::new("run", "happy", "8"))
    );

    let r = say(&engine, activity("jogging"), r.attributes).await;
    let r = say(&engine, activity("coffee"), r.attributes).await;
    assert_eq!(r.attributes.dialogue.last_intent(), "AddActivityToEntry");
    assert!(stored(&engine).await.is_empty());

    let r = say(&engine, IntentCall::of(IntentName::No), r.attributes).await;
    assert_eq!(r.speech, engine.responses().entry_created);
    assert_eq!(r.attributes.dialogue, DialogueState::Idle);
    assert_eq!(r.attributes.pin(), Some(PIN));

    let entries = opened(&engine).await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "run");
    assert_eq!(entries[0].mood, "happy");
    assert_eq!(entries[0].rating, "8");
    assert_eq!(
        entries[0].activities,
        vec!["jogging".to_string(), "coffee".to_string()]
    );
}

#[tokio::test]
async fn stored_fields_are_ciphertext() {
    let engine = engine().await;
    let r = say(&engine, create("run", "happy", "8"), unlocked()).await;
    let r = say(&engine, activity("jogging"), r.attributes).await;
    say(&engine, IntentCall::of(IntentName::No), r.attributes).await;

    let sealed = &stored(&engine).await[0];
    assert_ne!(sealed.name, "run");
    assert_ne!(sealed.mood, "happy");
    assert_ne!(sealed.activities[0], "jogging");
}

#[tokio::test]
async fn yes_while_building_delegates_to_add_activity() {
    let engine = engine().await;
    let r = say(&engine, create("run", "happy", "8"), unlocked()).await;
    let before = r.attributes.clone();

    let r = say(&engine, IntentCall::of(IntentName::Yes), r.attributes).await;
    assert_eq!(
        r.directive,
        Some(Directive::delegate(IntentName::AddActivityToEntry))
    );
    assert_eq!(r.attributes, before);
}

#[rstest]
#[case::yes(IntentName::Yes)]
#[case::no(IntentName::No)]
#[case::add_activity(IntentName::AddActivityToEntry)]
#[tokio::test]
async fn building_intents_without_a_draft_fall_back(#[case] intent: IntentName) {
    let engine = engine().await;
    let call = IntentCall::of(intent).with_slot(SLOT_ACTIVITY, "reading");

    let r = say(&engine, call, unlocked()).await;
    assert_eq!(r.speech, engine.responses().unknown_request);
    assert_eq!(r.attributes, unlocked());
    assert!(stored(&engine).await.is_empty());
}

#[tokio::test]
async fn missing_slot_is_elicited_with_carried_intent() {
    let engine = engine().await;
    let call = IntentCall::of(IntentName::CreateEntry)
        .with_slot(SLOT_NAME, "run")
        .with_slot(SLOT_MOOD, "happy");

    let r = say(&engine, call.clone(), unlocked()).await;
    assert_eq!(r.speech, engine.responses().rating_prompt);
    assert_eq!(r.directive, Some(Directive::elicit(SLOT_RATING, Some(call))));
    assert_eq!(r.attributes, unlocked());
}

#[tokio::test]
async fn duplicate_name_re_elicits_name() {
    let engine = engine().await;
    seed(&engine, &["Run"]).await;

    let r = say(&engine, create("run", "calm", "5"), unlocked()).await;
    assert_eq!(r.speech, engine.responses().duplicate_name);
    let carried = IntentCall::of(IntentName::CreateEntry)
        .with_slot(SLOT_MOOD, "calm")
        .with_slot(SLOT_RATING, "5");
    assert_eq!(r.directive, Some(Directive::elicit(SLOT_NAME, Some(carried))));
    assert_eq!(r.attributes.dialogue, DialogueState::Idle);
}

#[tokio::test]
async fn failed_save_keeps_the_draft() {
    let engine = engine().await;
    let r = say(&engine, create("run", "happy", "8"), unlocked()).await;
    let r = say(&engine, activity("jogging"), r.attributes).await;
    let building = r.attributes.clone();

    engine.gateway().reject_writes(true);
    let r = say(&engine, IntentCall::of(IntentName::No), r.attributes).await;
    assert_eq!(r.speech, engine.responses().entry_create_failed);
    assert_eq!(r.attributes, building);

    engine.gateway().reject_writes(false);
    let r = say(&engine, IntentCall::of(IntentName::No), r.attributes).await;
    assert_eq!(r.speech, engine.responses().entry_created);
    assert_eq!(opened(&engine).await[0].activities, vec!["jogging".to_string()]);
}

// ---------------------------------------------------------------------------
// Listing and paging
// ---------------------------------------------------------------------------

#[tokio::test]
async fn listing_pages_most_recent_first() {
    let engine = engine().await;
    seed(&engine, &["a", "b", "c", "d", "e", "f", "g"]).await;

    let r = say(&engine, IntentCall::of(IntentName::ListEntries), unlocked()).await;
    assert!(r.speech.starts_with("First, g: "), "{}", r.speech);
    assert!(r.speech.contains("Third, e: "));
    assert!(r.speech.contains("Page 1 of 3."));

    let r = say(&engine, IntentCall::of(IntentName::Next), r.attributes).await;
    assert!(r.speech.starts_with("First, d: "), "{}", r.speech);

    let r = say(&engine, IntentCall::of(IntentName::Next), r.attributes).await;
    assert!(r.speech.starts_with("First, a: "), "{}", r.speech);
    assert!(!r.speech.contains("Second,"));

    let last = r.attributes.clone();
    let r = say(&engine, IntentCall::of(IntentName::Next), r.attributes).await;
    assert_eq!(r.speech, engine.responses().no_more_entries);
    assert_eq!(r.attributes, last);

    let r = say(&engine, IntentCall::of(IntentName::Previous), r.attributes).await;
    assert!(r.speech.contains("Page 2 of 3."));
}

#[tokio::test]
async fn previous_on_first_page_stays_on_first_page() {
    let engine = engine().await;
    seed(&engine, &["a", "b", "c", "d"]).await;

    let r = say(&engine, IntentCall::of(IntentName::ListEntries), unlocked()).await;
    let r = say(&engine, IntentCall::of(IntentName::Previous), r.attributes).await;
    assert!(r.speech.contains("Page 1 of 2."));
    let DialogueState::ListEntries { page, .. } = r.attributes.dialogue else {
        panic!("listing should stay cached");
    };
    assert_eq!(page, 1);
}

#[tokio::test]
async fn listing_filters_by_mood() {
    let engine = engine().await;
    seed(&engine, &["a", "b", "c"]).await;

    let call = IntentCall::of(IntentName::ListEntries).with_slot(SLOT_MOOD, "SAD");
    let r = say(&engine, call, unlocked()).await;
    assert!(r.speech.starts_with("First, b: feeling sad"), "{}", r.speech);
    assert!(r.speech.contains("Page 1 of 1."));
}

#[tokio::test]
async fn empty_listing_says_so() {
    let engine = engine().await;
    let r = say(&engine, IntentCall::of(IntentName::ListEntries), unlocked()).await;
    assert_eq!(r.speech, engine.responses().no_entries);
    assert_eq!(r.attributes.dialogue, DialogueState::Idle);
}

#[tokio::test]
async fn paging_without_listing_falls_back() {
    let engine = engine().await;
    let r = say(&engine, IntentCall::of(IntentName::Next), unlocked()).await;
    assert_eq!(r.speech, engine.responses().unknown_request);
}

// ---------------------------------------------------------------------------
// View and delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn view_narrates_entry_case_insensitively() {
    let engine = engine().await;
    let r = say(&engine, create("Run", "happy", "8"), unlocked()).await;
    let r = say(&engine, activity("jogging"), r.attributes).await;
    let r = say(&engine, activity("coffee"), r.attributes).await;
    say(&engine, IntentCall::of(IntentName::No), r.attributes).await;

    let call = IntentCall::of(IntentName::ViewEntry).with_slot(SLOT_NAME, "run");
    let r = say(&engine, call, unlocked()).await;
    assert_eq!(
        r.speech,
        "In Run, you were feeling happy with a rating of 8. You were jogging and coffee."
    );
}

#[tokio::test]
async fn view_of_unknown_entry_is_not_found() {
    let engine = engine().await;
    seed(&engine, &["a"]).await;
    let before = stored(&engine).await;

    let call = IntentCall::of(IntentName::ViewEntry).with_slot(SLOT_NAME, "zzz");
    let r = say(&engine, call, unlocked()).await;
    assert_eq!(r.speech, engine.responses().entry_not_found);
    assert_eq!(stored(&engine).await, before);
}

#[tokio::test]
async fn delete_asks_for_confirmation_first() {
    let engine = engine().await;
    seed(&engine, &["a", "b"]).await;

    let call = delete("A", ConfirmationStatus::None);
    let r = say(&engine, call.clone(), unlocked()).await;
    assert_eq!(r.speech, "Are you sure you want to delete the entry a?");
    assert_eq!(r.directive, Some(Directive::ConfirmIntent { intent: call }));
    assert_eq!(
        r.attributes.dialogue,
        DialogueState::DeleteEntry { name: "a".into() }
    );
    assert_eq!(stored(&engine).await.len(), 2);
}

#[tokio::test]
async fn confirmed_delete_removes_only_that_entry() {
    let engine = engine().await;
    seed(&engine, &["a", "b"]).await;

    let r = say(&engine, delete("a", ConfirmationStatus::Confirmed), unlocked()).await;
    assert_eq!(r.speech, engine.responses().entry_deleted);
    assert_eq!(r.attributes.dialogue, DialogueState::Idle);
    let names: Vec<String> = opened(&engine).await.into_iter().map(|e| e.name).collect();
    assert_eq!(names, vec!["b".to_string()]);
}

#[tokio::test]
async fn failed_delete_keeps_the_confirmation_state() {
    let engine = engine().await;
    seed(&engine, &["a", "b"]).await;
    let confirming = unlocked().with_dialogue(DialogueState::DeleteEntry { name: "a".into() });

    engine.gateway().reject_writes(true);
    let r = say(&engine, delete("a", ConfirmationStatus::Confirmed), confirming.clone()).await;
    assert_eq!(r.speech, engine.responses().entry_delete_failed);
    assert_eq!(r.attributes, confirming);
    assert_eq!(stored(&engine).await.len(), 2);

    engine.gateway().reject_writes(false);
    let r = say(&engine, delete("a", ConfirmationStatus::Confirmed), r.attributes).await;
    assert_eq!(r.speech, engine.responses().entry_deleted);
    assert_eq!(r.attributes.dialogue, DialogueState::Idle);
}

#[tokio::test]
async fn denied_delete_keeps_entry() {
    let engine = engine().await;
    seed(&engine, &["a"]).await;

    let r = say(&engine, delete("a", ConfirmationStatus::Denied), unlocked()).await;
    assert_eq!(r.speech, engine.responses().entry_not_deleted);
    assert_eq!(stored(&engine).await.len(), 1);
}

#[tokio::test]
async fn delete_of_unknown_entry_is_not_found() {
    let engine = engine().await;
    seed(&engine, &["a"]).await;

    let r = say(&engine, delete("zzz", ConfirmationStatus::None), unlocked()).await;
    assert_eq!(r.speech, engine.responses().entry_not_found);
    assert_eq!(r.directive, None);
}

// ---------------------------------------------------------------------------
// PIN gate
// ---------------------------------------------------------------------------

#[rstest]
#[case::create(create("run", "happy", "8"))]
#[case::list(IntentCall::of(IntentName::ListEntries))]
#[case::view(IntentCall::of(IntentName::ViewEntry).with_slot(SLOT_NAME, "a"))]
#[case::delete(delete("a", ConfirmationStatus::Confirmed))]
#[case::help(IntentCall::of(IntentName::Help))]
#[case::unknown(IntentCall::new("AMAZON.FallbackIntent"))]
#[tokio::test]
async fn content_intents_without_pin_elicit_pin(#[case] call: IntentCall) {
    let engine = engine().await;
    seed(&engine, &["a"]).await;
    let before = stored(&engine).await;

    let r = say(&engine, call.clone(), SessionAttributes::default()).await;
    assert_eq!(
        r.directive,
        Some(Directive::elicit(
            SLOT_PIN,
            Some(IntentCall::of(IntentName::SetPin))
        ))
    );
    assert_eq!(r.attributes.pending_intent, Some(call));
    assert_eq!(r.attributes.pin(), None);
    assert_eq!(stored(&engine).await, before);
}

#[tokio::test]
async fn correct_pin_replays_held_intent() {
    let engine = engine().await;
    seed(&engine, &["a"]).await;

    let r = say(
        &engine,
        IntentCall::of(IntentName::ViewEntry).with_slot(SLOT_NAME, "a"),
        SessionAttributes::default(),
    )
    .await;
    let set_pin = IntentCall::of(IntentName::SetPin).with_slot(SLOT_PIN, PIN);
    let r = say(&engine, set_pin, r.attributes).await;

    assert!(r.speech.starts_with("In a, you were feeling happy"), "{}", r.speech);
    assert_eq!(r.attributes.pin(), Some(PIN));
    assert_eq!(r.attributes.pending_intent, None);
}

#[tokio::test]
async fn correct_pin_without_held_intent_is_ready() {
    let engine = engine().await;
    let set_pin = IntentCall::of(IntentName::SetPin).with_slot(SLOT_PIN, PIN);
    let r = say(&engine, set_pin, SessionAttributes::default()).await;
    assert_eq!(r.speech, engine.responses().ready);
    assert_eq!(r.attributes.pin(), Some(PIN));
}

#[tokio::test]
async fn wrong_pin_re_elicits_and_keeps_held_intent() {
    let engine = engine().await;
    let held = IntentCall::of(IntentName::ListEntries);
    let r = say(&engine, held.clone(), SessionAttributes::default()).await;

    let set_pin = IntentCall::of(IntentName::SetPin).with_slot(SLOT_PIN, "9999");
    let r = say(&engine, set_pin, r.attributes).await;
    assert_eq!(r.speech, engine.responses().incorrect_pin);
    assert_eq!(r.attributes.pin(), None);
    assert_eq!(r.attributes.pending_intent, Some(held));
    assert!(matches!(r.directive, Some(Directive::ElicitSlot { .. })));
}

// ---------------------------------------------------------------------------
// Request types and termination
// ---------------------------------------------------------------------------

#[rstest]
#[case::cancel(IntentName::Cancel)]
#[case::stop(IntentName::Stop)]
#[tokio::test]
async fn termination_ends_without_pin(#[case] intent: IntentName) {
    let engine = engine().await;
    let building = SessionAttributes {
        pin: None,
        pending_intent: Some(IntentCall::of(IntentName::ListEntries)),
        dialogue: DialogueState::Idle,
    };
    let r = say(&engine, IntentCall::of(intent), building).await;
    assert_eq!(r.speech, engine.responses().goodbye);
    assert!(r.ends_session());
    assert_eq!(r.attributes, SessionAttributes::default());
}

#[tokio::test]
async fn launch_welcomes_without_gate() {
    let engine = engine().await;
    let r = engine
        .handle(TurnRequest {
            kind: TurnKind::Launch,
            attributes: SessionAttributes::default(),
            identity_token: TOKEN.into(),
        })
        .await
        .unwrap();
    assert_eq!(r.speech, engine.responses().launch);
    assert_eq!(r.directive, None);
}

#[tokio::test]
async fn session_end_is_silent() {
    let engine = engine().await;
    let r = engine
        .handle(TurnRequest {
            kind: TurnKind::End,
            attributes: unlocked(),
            identity_token: TOKEN.into(),
        })
        .await
        .unwrap();
    assert_eq!(r.speech, "");
    assert_eq!(r.attributes, unlocked());
}

#[tokio::test]
async fn unknown_caller_is_rejected() {
    let engine = engine().await;
    let err = engine
        .handle(TurnRequest {
            kind: TurnKind::Launch,
            attributes: SessionAttributes::default(),
            identity_token: "stranger".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, TurnError::Unauthorized));
}

// ---------------------------------------------------------------------------
// Unreadable entries
// ---------------------------------------------------------------------------

async fn seed_foreign(engine: &TurnEngine<MemoryGateway>, name: &str) {
    let entry = Entry {
        id: "ent-f0f0f0f0".into(),
        name: name.into(),
        mood: "happy".into(),
        rating: "3".into(),
        activities: vec![],
    };
    engine
        .gateway()
        .append_entry(TOKEN, &seal_entry(&entry, &PinKey::derive("9999")).unwrap())
        .await
        .unwrap();
}

#[tokio::test]
async fn unreadable_entry_is_skipped_in_listing() {
    let engine = engine().await;
    seed(&engine, &["a"]).await;
    seed_foreign(&engine, "ghost").await;

    let r = say(&engine, IntentCall::of(IntentName::ListEntries), unlocked()).await;
    assert!(r.speech.contains("First, a: feeling happy, rated 1."));
    assert!(!r.speech.contains("ghost"));

    let call = IntentCall::of(IntentName::ViewEntry).with_slot(SLOT_NAME, "a");
    let r = say(&engine, call, unlocked()).await;
    assert!(r.speech.starts_with("In a, you were feeling happy"));
}

#[tokio::test]
async fn journal_that_never_opens_is_a_failure() {
    let engine = engine().await;
    seed_foreign(&engine, "ghost").await;

    let r = say(&engine, IntentCall::of(IntentName::ListEntries), unlocked()).await;
    assert_eq!(r.speech, engine.responses().failure);
}
