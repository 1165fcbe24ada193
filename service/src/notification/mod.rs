//! Notification queue: serialized delivery of match event alerts.
//!
//! Two producer channels feed one display queue. Standard alerts are
//! enqueued for display directly; advanced alerts go through a render
//! worker pool whose output lands on the same display queue, so a
//! single worker serializes everything the user sees.

pub mod types;

mod display;
mod render;

#[cfg(test)]
mod tests;

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use tokio::sync::{Mutex, RwLock, mpsc};
use tokio_util::sync::CancellationToken;

use crate::classifier;
use crate::config::{DetailMode, NotificationLevel, ServiceConfig};
use crate::match_state::MatchSnapshot;
use crate::sinks::{DisplaySink, ImageFetcher, PresentationSignal};

use types::{AdvancedTask, NotificationRequest};

pub use display::sleep_or_cancel;

/// Extra time an advanced asset stays up, covering the overlay's
/// transition animation.
pub(crate) const EXTRA_DISPLAY_DELAY: Duration = Duration::from_millis(1500);

/// Pause after resetting the presentation surface before the next item.
pub(crate) const SETTLE_DELAY: Duration = Duration::from_millis(500);

const DEFAULT_TIMEOUT_MS: u64 = 2000;

/// Shared notification settings. Written only by [`NotificationQueue::configure`];
/// readers may see a value one reload cycle stale, never a torn one.
#[derive(Debug, Clone, Copy)]
struct QueueSettings {
    level: NotificationLevel,
    detailed: bool,
    advanced: bool,
    timeout_ms: u64,
}

/// Construction options for the queue.
pub struct QueueOptions {
    /// Where rendered advanced assets are written (transient).
    pub asset_dir: PathBuf,
    /// Where standard-notification icons live.
    pub media_dir: PathBuf,
    /// Render pool size.
    pub render_workers: usize,
    /// Raw TTF/OTF bytes for rendered notifications. Without a font
    /// the advanced path falls back to standard text alerts.
    pub font: Option<Vec<u8>>,
}

/// Public entry point for the notification subsystem.
#[derive(Clone)]
pub struct NotificationQueue {
    inner: Arc<QueueInner>,
}

pub(crate) struct QueueInner {
    display_tx: mpsc::UnboundedSender<NotificationRequest>,
    render_tx: mpsc::UnboundedSender<AdvancedTask>,
    render_rx: Arc<Mutex<mpsc::UnboundedReceiver<AdvancedTask>>>,
    settings: RwLock<QueueSettings>,
    pool_started: AtomicBool,
    render_workers: AtomicUsize,
    pool_size: usize,
    shutdown: CancellationToken,
    pub(crate) display: Arc<dyn DisplaySink>,
    pub(crate) presenter: Arc<dyn PresentationSignal>,
    pub(crate) images: Arc<dyn ImageFetcher>,
    pub(crate) asset_dir: PathBuf,
    media_dir: PathBuf,
    pub(crate) font: Option<Arc<Vec<u8>>>,
}

impl QueueInner {
    pub(crate) fn shutdown(&self) -> &CancellationToken {
        &self.shutdown
    }
}

impl NotificationQueue {
    /// Build the queue and start its display worker. Render workers
    /// start later, when advanced mode is first enabled.
    pub fn new(
        display: Arc<dyn DisplaySink>,
        presenter: Arc<dyn PresentationSignal>,
        images: Arc<dyn ImageFetcher>,
        options: QueueOptions,
        shutdown: CancellationToken,
    ) -> Self {
        let (display_tx, display_rx) = mpsc::unbounded_channel();
        let (render_tx, render_rx) = mpsc::unbounded_channel();

        let inner = Arc::new(QueueInner {
            display_tx,
            render_tx,
            render_rx: Arc::new(Mutex::new(render_rx)),
            settings: RwLock::new(QueueSettings {
                level: NotificationLevel::empty(),
                detailed: false,
                advanced: false,
                timeout_ms: DEFAULT_TIMEOUT_MS,
            }),
            pool_started: AtomicBool::new(false),
            render_workers: AtomicUsize::new(0),
            pool_size: options.render_workers.max(1),
            shutdown,
            display,
            presenter,
            images,
            asset_dir: options.asset_dir,
            media_dir: options.media_dir,
            font: options.font.map(Arc::new),
        });

        tokio::spawn(display::display_loop(inner.clone(), display_rx));
        tracing::info!("Notification display worker started");

        Self { inner }
    }

    /// Update shared settings. Enabling advanced mode starts the render
    /// pool; repeated enables are idempotent. Disabling does not shrink
    /// the pool — idle workers simply receive no more work.
    pub async fn configure(
        &self,
        level: NotificationLevel,
        detailed: bool,
        advanced: bool,
        timeout_ms: u64,
    ) {
        {
            let mut settings = self.inner.settings.write().await;
            *settings = QueueSettings {
                level,
                detailed,
                advanced,
                timeout_ms,
            };
        }
        if advanced {
            self.ensure_render_pool();
        }
    }

    /// Convenience wrapper used by the settings reload path.
    pub async fn configure_from(&self, config: &ServiceConfig) {
        self.configure(
            config.level(),
            config.detailed,
            config.advanced,
            config.notification_timeout_ms,
        )
        .await;
    }

    /// Classify a snapshot and enqueue a request per intent.
    ///
    /// Settings are read once per call; a submit racing a configure may
    /// use the previous values, which is fine — queued requests are
    /// never retroactively altered either.
    pub async fn submit(&self, snapshot: &MatchSnapshot) {
        let settings = *self.inner.settings.read().await;

        let use_advanced =
            settings.advanced && settings.detailed && self.inner.font.is_some();
        let detail = DetailMode::resolve(settings.detailed, use_advanced);

        for intent in classifier::classify(snapshot, settings.level, detail) {
            if use_advanced {
                let task = AdvancedTask {
                    kind: intent.kind,
                    title: intent.title,
                    simple: intent.simple,
                    snapshot: snapshot.clone(),
                    timeout_ms: settings.timeout_ms,
                };
                if self.inner.render_tx.send(task).is_err() {
                    tracing::warn!("Render queue closed; dropping advanced task");
                }
            } else {
                let request = NotificationRequest::Standard {
                    title: intent.title,
                    message: snapshot.to_string(),
                    icon: intent.icon.map(|name| self.inner.media_dir.join(name)),
                    timeout_ms: settings.timeout_ms,
                };
                if self.inner.display_tx.send(request).is_err() {
                    tracing::warn!("Display queue closed; dropping notification");
                }
            }
        }
    }

    /// Number of currently running render workers.
    pub fn render_worker_count(&self) -> usize {
        self.inner.render_workers.load(Ordering::SeqCst)
    }

    fn ensure_render_pool(&self) {
        if self.inner.pool_started.swap(true, Ordering::SeqCst) {
            return;
        }
        for worker in 0..self.inner.pool_size {
            self.inner.render_workers.fetch_add(1, Ordering::SeqCst);
            tokio::spawn(render::render_loop(
                self.inner.clone(),
                self.inner.render_rx.clone(),
                worker,
            ));
        }
        tracing::info!(
            workers = self.inner.pool_size,
            "Render worker pool started"
        );
    }

    #[cfg(test)]
    pub(crate) fn inner(&self) -> &Arc<QueueInner> {
        &self.inner
    }
}
