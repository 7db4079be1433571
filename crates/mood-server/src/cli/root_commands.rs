use clap::{Args, Subcommand};

use crate::cli::subcommands::ParticipantCommands;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Serve the voice-platform endpoint and the companion entries endpoint.
    Serve(ServeArgs),
    /// Participant provisioning.
    Participant {
        #[command(subcommand)]
        action: ParticipantCommands,
    },
}

#[derive(Clone, Debug, Args)]
pub struct ServeArgs {
    /// Listen address (overrides `server.bind`).
    #[arg(long)]
    pub bind: Option<String>,
}
