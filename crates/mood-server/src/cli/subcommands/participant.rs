use clap::{Args, Subcommand};

/// Participant management commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ParticipantCommands {
    /// Register a bearer token with its PIN.
    Add(ParticipantAddArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ParticipantAddArgs {
    /// Bearer token the voice platform will present.
    #[arg(long)]
    pub token: String,
    /// PIN that unlocks the journal. Only its hash is stored.
    #[arg(long)]
    pub pin: String,
}
