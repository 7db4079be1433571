use mood_config::MoodConfig;
use mood_dialogue::TurnEngine;

use crate::bootstrap;
use crate::cli::ServeArgs;
use crate::transport::{self, App};

pub async fn handle(args: &ServeArgs, config: MoodConfig) -> anyhow::Result<()> {
    let bind = args.bind.clone().unwrap_or_else(|| config.server.bind.clone());
    let gateway = bootstrap::open_gateway(&config).await?;
    let app = App {
        engine: TurnEngine::new(gateway, config.responses),
        server: config.server,
    };
    transport::serve(&app, &bind).await
}
