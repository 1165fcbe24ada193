//! Notification pipeline value types.

use std::path::PathBuf;

use crate::classifier::EventKind;
use crate::match_state::MatchSnapshot;

/// An item owned by the display queue until the single display worker
/// pops it, then discarded.
#[derive(Debug, Clone)]
pub enum NotificationRequest {
    /// Plain text + icon toast.
    Standard {
        title: String,
        message: String,
        icon: Option<PathBuf>,
        timeout_ms: u64,
    },
    /// A rendered advanced asset, ready for the presentation surface.
    AdvancedPrepared { asset: PathBuf, timeout_ms: u64 },
}

/// Work for a render worker.
///
/// Carries everything needed to compose an advanced notification,
/// captured at classification time so the worker operates on a stable
/// copy while the polling loop moves on.
#[derive(Debug, Clone)]
pub struct AdvancedTask {
    pub kind: EventKind,
    pub title: String,
    /// Use the scoreboard layout even for a goal/card event.
    pub simple: bool,
    pub snapshot: MatchSnapshot,
    pub timeout_ms: u64,
}
