//! Render workers: turn advanced tasks into display-ready bitmaps.
//!
//! Imagery fetches and file writes all happen here, on the render
//! worker, never on the display worker. Any failure degrades the task
//! rather than dropping it: missing imagery becomes a placeholder, a
//! failed compose or save becomes a plain text notification.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use image::DynamicImage;
use tokio::sync::{Mutex, mpsc};

use score_render::{CardOverlay, LayoutInput};

use super::QueueInner;
use super::types::{AdvancedTask, NotificationRequest};
use crate::classifier::EventKind;

pub(crate) async fn render_loop(
    inner: Arc<QueueInner>,
    rx: Arc<Mutex<mpsc::UnboundedReceiver<AdvancedTask>>>,
    worker: usize,
) {
    loop {
        // the pool shares one receiver; lock only to pop
        let task = {
            let mut guard = tokio::select! {
                _ = inner.shutdown().cancelled() => break,
                guard = rx.lock() => guard,
            };
            tokio::select! {
                _ = inner.shutdown().cancelled() => break,
                task = guard.recv() => match task {
                    Some(t) => t,
                    None => break,
                },
            }
        };

        let request = prepare(&inner, task).await;
        if inner.display_tx.send(request).is_err() {
            break;
        }
    }

    inner.render_workers.fetch_sub(1, Ordering::SeqCst);
    tracing::info!(worker, "Render worker stopped");
}

/// Turn a task into a display request. Never fails: a render problem
/// falls back to a standard text notification for the same event.
async fn prepare(inner: &QueueInner, task: AdvancedTask) -> NotificationRequest {
    match compose(inner, &task).await {
        Ok(asset) => NotificationRequest::AdvancedPrepared {
            asset,
            timeout_ms: task.timeout_ms,
        },
        Err(e) => {
            tracing::warn!(title = %task.title, error = %e, "Render failed; falling back to text");
            NotificationRequest::Standard {
                title: task.title,
                message: task.snapshot.to_string(),
                icon: None,
                timeout_ms: task.timeout_ms,
            }
        }
    }
}

async fn compose(inner: &QueueInner, task: &AdvancedTask) -> Result<PathBuf, anyhow::Error> {
    let state = &task.snapshot.state;
    let font_bytes = inner
        .font
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("no font configured"))?;
    let font = score_render::load_font(font_bytes)?;

    let scoreboard = task.simple || task.kind == EventKind::StatusChange;

    let mut portrait: Option<DynamicImage> = None;
    let mut home_badge: Option<DynamicImage> = None;
    let mut away_badge: Option<DynamicImage> = None;

    if scoreboard {
        // badges are cosmetic; a failed fetch just leaves them out
        home_badge = fetch_badge(inner, &state.home_team).await;
        away_badge = fetch_badge(inner, &state.away_team).await;
    } else if let Some(player) = attribution_for(task) {
        portrait = match inner
            .images
            .player_portrait(&player, &state.home_team, &state.away_team)
            .await
        {
            Ok(img) => Some(img),
            Err(e) => {
                tracing::debug!(player, error = %e, "Portrait unresolved; using placeholder");
                None
            }
        };
    }

    let card = match task.kind {
        EventKind::YellowCard => Some(CardOverlay::Yellow),
        EventKind::RedCard => Some(CardOverlay::Red),
        _ => None,
    };

    let input = LayoutInput {
        title: &task.title,
        home_team: &state.home_team,
        away_team: &state.away_team,
        home_score: state.home_score,
        away_score: state.away_score,
        match_time: &state.match_time,
        portrait: portrait.as_ref(),
        home_badge: home_badge.as_ref(),
        away_badge: away_badge.as_ref(),
        card,
    };

    let img = if scoreboard {
        score_render::scoreboard_layout(&font, &input)
    } else {
        score_render::player_layout(&font, &input)
    };

    std::fs::create_dir_all(&inner.asset_dir)?;
    let filename = format!(
        "{}_{}.png",
        chrono::Utc::now().timestamp_millis(),
        sanitize(&state.home_team)
    );
    let path = inner.asset_dir.join(filename);
    DynamicImage::ImageRgba8(img).save(&path)?;

    Ok(path)
}

async fn fetch_badge(inner: &QueueInner, team: &str) -> Option<DynamicImage> {
    match inner.images.team_badge(team).await {
        Ok(img) => Some(img),
        Err(e) => {
            tracing::debug!(team, error = %e, "Badge unresolved");
            None
        }
    }
}

/// Player behind the event, if the snapshot carries one.
fn attribution_for(task: &AdvancedTask) -> Option<String> {
    let state = &task.snapshot.state;
    let att = match task.kind {
        EventKind::Goal => state.last_goal_scorer.as_ref(),
        EventKind::YellowCard => state.last_yellow_card.as_ref(),
        EventKind::RedCard => state.last_red_card.as_ref(),
        EventKind::StatusChange => None,
    }?;
    let player = att.player.trim();
    (!player.is_empty()).then(|| player.to_string())
}

fn sanitize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}
