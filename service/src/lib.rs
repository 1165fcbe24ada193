pub mod app;
pub mod background;
pub mod classifier;
pub mod config;
pub mod match_state;
pub mod notification;
pub mod player_match;
pub mod shutdown;
pub mod sinks;

use std::path::PathBuf;

use config::{ServiceConfig, SettingsStore};

/// Determine the data directory for the service.
/// Priority: MATCHDAY_DATA_DIR env var > ~/.matchday
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("MATCHDAY_DATA_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".matchday")
}

/// Load .env from multiple candidate paths.
fn load_dotenv() {
    let candidates = [".env", "../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}

/// Initialize the settings store and load the runtime config.
pub fn init_foundation() -> Result<(SettingsStore, ServiceConfig, PathBuf), anyhow::Error> {
    load_dotenv();

    let dir = data_dir();
    std::fs::create_dir_all(&dir)?;

    let store = SettingsStore::new(dir.join("settings.json"));
    store.initialize_defaults()?;

    let config = ServiceConfig::load(&store)?;

    if config.feed_url.is_empty() {
        tracing::warn!("FEED_URL is not set; the score poll loop will idle");
    }

    tracing::info!(
        poll_interval = config.poll_interval_secs,
        "Settings loaded"
    );
    Ok((store, config, dir))
}
