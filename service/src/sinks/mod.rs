//! Collaborator boundary: display, presentation surface, imagery and
//! the score feed.
//!
//! The notification core only ever talks to these traits; the shipped
//! implementations below are thin adapters so the binary is a working
//! service out of the box.

mod desktop;
mod fetcher;
mod signal;
mod source;

pub use desktop::DesktopSink;
pub use fetcher::{CachingFetcher, FetchError};
pub use signal::FileSignal;
pub use source::{JsonFeedSource, ScoreSource, SourceError};

use std::path::Path;

use async_trait::async_trait;
use image::DynamicImage;

/// Where standard notifications are shown.
///
/// Implementations should be quick; the display worker logs a failure
/// and moves on, so one bad notification never starves the queue.
pub trait DisplaySink: Send + Sync {
    fn show(
        &self,
        title: &str,
        message: &str,
        icon: Option<&Path>,
        timeout_ms: u64,
    ) -> Result<(), anyhow::Error>;
}

/// Hands a rendered advanced asset to a separate rendering surface and
/// clears it again once the display window has passed.
pub trait PresentationSignal: Send + Sync {
    fn present(&self, asset: &Path) -> Result<(), anyhow::Error>;
    fn reset(&self) -> Result<(), anyhow::Error>;
}

/// What a fetched image is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    PlayerCutout,
    PlayerThumb,
    TeamBadge,
}

/// Resolves imagery for render workers.
///
/// Only render workers call this; failures surface as errors and the
/// worker substitutes a placeholder, so a dead imagery backend never
/// fails a task.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn player_portrait(
        &self,
        player: &str,
        home_team: &str,
        away_team: &str,
    ) -> Result<DynamicImage, anyhow::Error>;

    async fn team_badge(&self, team: &str) -> Result<DynamicImage, anyhow::Error>;
}
