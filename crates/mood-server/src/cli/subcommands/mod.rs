pub mod participant;

pub use participant::ParticipantCommands;
