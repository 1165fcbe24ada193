//! The single display worker.
//!
//! Serializes every user-visible notification: one item is popped,
//! shown, and the shared timeout honored before the next pop. The only
//! blocking points are the queue pop and the timeout sleep, both of
//! which also watch the shutdown token.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use super::types::NotificationRequest;
use super::{EXTRA_DISPLAY_DELAY, QueueInner, SETTLE_DELAY};

/// Sleep for `duration` unless the token fires first. True means
/// shutdown fired.
pub async fn sleep_or_cancel(token: &CancellationToken, duration: Duration) -> bool {
    tokio::select! {
        _ = token.cancelled() => true,
        _ = sleep(duration) => false,
    }
}

pub(crate) async fn display_loop(
    inner: Arc<QueueInner>,
    mut rx: mpsc::UnboundedReceiver<NotificationRequest>,
) {
    loop {
        let request = tokio::select! {
            _ = inner.shutdown().cancelled() => break,
            request = rx.recv() => match request {
                Some(r) => r,
                None => break,
            },
        };

        match request {
            NotificationRequest::Standard {
                title,
                message,
                icon,
                timeout_ms,
            } => {
                if let Err(e) = inner
                    .display
                    .show(&title, &message, icon.as_deref(), timeout_ms)
                {
                    tracing::warn!(title, error = %e, "Display collaborator failed; continuing");
                }
                // hold the queue while the toast is visible
                if sleep_or_cancel(inner.shutdown(), Duration::from_millis(timeout_ms)).await {
                    break;
                }
            }
            NotificationRequest::AdvancedPrepared { asset, timeout_ms } => {
                if let Err(e) = inner.presenter.present(&asset) {
                    tracing::warn!(asset = %asset.display(), error = %e, "Presentation signal failed");
                }
                let visible = Duration::from_millis(timeout_ms) + EXTRA_DISPLAY_DELAY;
                if sleep_or_cancel(inner.shutdown(), visible).await {
                    break;
                }
                if let Err(e) = inner.presenter.reset() {
                    tracing::warn!(error = %e, "Presentation reset failed");
                }
                if let Err(e) = std::fs::remove_file(&asset) {
                    tracing::debug!(asset = %asset.display(), error = %e, "Transient asset not removed");
                }
                if sleep_or_cancel(inner.shutdown(), SETTLE_DELAY).await {
                    break;
                }
            }
        }
    }

    tracing::info!("Display worker stopped");
}
