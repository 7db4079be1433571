use clap::Parser;

pub mod root_commands;
pub mod subcommands;

pub use root_commands::{Commands, ServeArgs};
pub use subcommands::ParticipantCommands;

/// Top-level CLI parser for the `moodd` binary.
#[derive(Debug, Parser)]
#[command(name = "moodd", version, about = "Mood journal voice backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}
