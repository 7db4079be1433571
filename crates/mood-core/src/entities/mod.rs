//! Entity structs for the journal domain.
//!
//! `Entry` is the in-memory plaintext form that only exists during a turn in
//! which the participant's PIN is known. `SealedEntry` is the at-rest form in
//! which every textual field is independently ciphertext.

mod entry;
mod participant;

pub use entry::{Entry, SealedEntry};
pub use participant::{Participant, ParticipantLookup};
