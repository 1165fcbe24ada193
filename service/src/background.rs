//! Background task loops: score polling and periodic settings reload.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crate::app::SharedState;
use crate::config::ServiceConfig;
use crate::match_state::MatchTracker;
use crate::notification::{NotificationQueue, sleep_or_cancel};
use crate::sinks::ScoreSource;

/// Poll the score feed and submit event snapshots to the queue.
///
/// The loop ticks every poll interval but only fetches scores on every
/// Nth tick; on the tick before a fetch it re-reads the settings file so
/// edits take effect without a restart.
pub async fn score_poll_loop(
    state: SharedState,
    queue: NotificationQueue,
    source: Arc<dyn ScoreSource>,
) {
    let shutdown_token = state.shutdown_token().clone();
    let mut tracker = MatchTracker::default();
    let mut tick: u32 = 0;

    loop {
        let (alerts_enabled, poll_secs, refresh_ticks) = {
            let config = state.config().await;
            (
                config.alerts_enabled,
                config.poll_interval_secs.max(1),
                config.score_refresh_ticks.max(2),
            )
        };

        if tick == 0 && alerts_enabled {
            poll_scores_once(&queue, source.as_ref(), &mut tracker).await;
        }

        if tick == refresh_ticks - 1 {
            reload_settings_once(&state, &queue).await;
        }

        tick = (tick + 1) % refresh_ticks;

        if sleep_or_cancel(&shutdown_token, Duration::from_secs(poll_secs)).await {
            tracing::info!("Score poll loop stopped (shutdown)");
            return;
        }
    }
}

async fn poll_scores_once(
    queue: &NotificationQueue,
    source: &dyn ScoreSource,
    tracker: &mut MatchTracker,
) {
    let matches = match source.fetch_matches().await {
        Ok(matches) => matches,
        Err(e) => {
            tracing::warn!("Score fetch failed: {e}");
            return;
        }
    };

    // drop state for matches that left the feed so a returning id
    // starts with a clean first sighting
    let live_ids: HashSet<String> = matches.iter().map(|m| m.match_id.clone()).collect();
    tracker.retain_matches(|id| live_ids.contains(id));

    for state in matches {
        let snapshot = tracker.observe(state);
        if snapshot.has_event() {
            tracing::debug!(%snapshot, "Match event detected");
            queue.submit(&snapshot).await;
        }
    }
}

async fn reload_settings_once(state: &SharedState, queue: &NotificationQueue) {
    let fresh = match ServiceConfig::load(state.store()) {
        Ok(fresh) => fresh,
        Err(e) => {
            tracing::debug!("Settings reload skipped/failed: {e}");
            return;
        }
    };

    let changed = {
        let current = state.config().await;
        fresh.changed_keys(&current)
    };
    if changed.is_empty() {
        return;
    }

    tracing::info!(?changed, "Settings changed, reconfiguring");
    queue.configure_from(&fresh).await;
    state.replace_config(fresh).await;
}
