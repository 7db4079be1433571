use anyhow::{Context, bail};
use mood_codec::hash_secret;
use mood_config::MoodConfig;
use mood_store::JournalGateway;

use crate::bootstrap;
use crate::cli::ParticipantCommands;
use crate::output::output;

pub async fn handle(action: &ParticipantCommands, config: &MoodConfig) -> anyhow::Result<()> {
    match action {
        ParticipantCommands::Add(args) => {
            let pin = args.pin.trim();
            if pin.is_empty() {
                bail!("--pin must not be empty");
            }
            if args.token.trim().is_empty() {
                bail!("--token must not be empty");
            }

            let gateway = bootstrap::open_gateway(config).await?;
            let participant = gateway
                .register_participant(args.token.trim(), &hash_secret(pin))
                .await
                .context("failed to register participant")?;
            tracing::info!(participant = %participant.id, "participant registered");
            output(&participant)
        }
    }
}
