//! # mood-core
//!
//! Core types, ID generation, and error types for the mood journal.
//!
//! This crate provides the foundational types shared across all journal crates:
//! - Entity structs for participants and journal entries (plaintext and sealed)
//! - Intent names and slot keys understood by the dialogue
//! - The turn envelope (request, response, platform directives)
//! - The session attribute record threaded through every turn
//! - ID prefix constants and generation helpers
//! - Cross-cutting error types

pub mod attributes;
pub mod entities;
pub mod errors;
pub mod ids;
pub mod intents;
pub mod turn;
