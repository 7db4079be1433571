//! # mood-dialogue
//!
//! Turn handling for the mood journal: one request in, one response out.
//!
//! [`TurnEngine::handle`] is the entry point. It resolves the caller, routes
//! `Launch`/`End` turns, sends every content intent through the PIN gate, and
//! hands verified turns to the dialogue state machine. The machine reads and
//! writes journal entries through a [`mood_store::JournalGateway`] and seals
//! them with the PIN carried in the session attributes.
//!
//! Semantic failures (unknown entry, duplicate name, storage hiccup, ...) are
//! spoken back to the user. Only an unknown caller or an unreachable store
//! during caller resolution surfaces as a [`TurnError`].

mod engine;
mod error;
mod machine;
pub mod narration;
pub mod pagination;
mod pin_gate;

pub use engine::TurnEngine;
pub use error::{DialogueFailure, TurnError};
pub use pagination::{PAGE_SIZE, Page, render_page};
