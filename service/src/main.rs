//! Headless service binary.
//!
//! Loads config, wires the notification queue to the desktop sink and
//! score feed, and runs the poll loop until Ctrl+C.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use matchday::app::SharedState;
use matchday::background;
use matchday::notification::{NotificationQueue, QueueOptions};
use matchday::shutdown;
use matchday::sinks::{CachingFetcher, DesktopSink, FileSignal, JsonFeedSource};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting Matchday (headless mode)");

    let (store, config, dir) = matchday::init_foundation()?;
    let state = SharedState::new(store, config, dir.clone());

    let config = state.config().await.clone();

    let font = if config.font_path.is_empty() {
        None
    } else {
        match std::fs::read(&config.font_path) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                tracing::warn!(path = %config.font_path, "Failed to read font, advanced notifications disabled: {e}");
                None
            }
        }
    };

    let media_dir = if config.media_dir.is_empty() {
        dir.join("media")
    } else {
        config.media_dir.clone().into()
    };

    let queue = NotificationQueue::new(
        Arc::new(DesktopSink::new()),
        Arc::new(FileSignal::new(&dir)),
        Arc::new(CachingFetcher::new(&dir)),
        QueueOptions {
            asset_dir: dir.join("notifications"),
            media_dir,
            render_workers: config.render_workers,
            font,
        },
        state.shutdown_token().clone(),
    );
    queue.configure_from(&config).await;

    let source = Arc::new(JsonFeedSource::new(config.feed_url.clone()));

    let s = state.clone();
    let q = queue.clone();
    tokio::spawn(async move { background::score_poll_loop(s, q, source).await });

    tracing::info!("Service running. Press Ctrl+C to stop.");

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down...");

    shutdown::graceful_shutdown(&state).await;
    Ok(())
}
