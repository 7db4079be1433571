use anyhow::Context;
use mood_config::MoodConfig;
use mood_store::LibsqlGateway;

pub fn load_config() -> anyhow::Result<MoodConfig> {
    MoodConfig::load_with_dotenv().context("failed to load configuration")
}

/// Open the journal database, creating its parent directory if needed.
pub async fn open_gateway(config: &MoodConfig) -> anyhow::Result<LibsqlGateway> {
    let path = &config.storage.database_path;
    if !config.storage.is_in_memory() {
        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create database directory {}", parent.display())
                })?;
            }
        }
    }
    LibsqlGateway::open_local(path)
        .await
        .with_context(|| format!("failed to open journal database at {path}"))
}
