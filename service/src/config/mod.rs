//! Configuration: typed service config, change detection, level flags.

pub mod defaults;
pub mod store;

pub use store::{SettingsStore, StoreError};

/// Which event kinds are eligible for extra notification detail.
///
/// Kept as a bitmask so a configuration change swaps a single value;
/// readers may see a value one reload cycle stale but never a torn one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NotificationLevel(u8);

impl NotificationLevel {
    pub const GOALSCORER: NotificationLevel = NotificationLevel(0b001);
    pub const YELLOW: NotificationLevel = NotificationLevel(0b010);
    pub const RED: NotificationLevel = NotificationLevel(0b100);

    pub const fn empty() -> Self {
        NotificationLevel(0)
    }

    #[must_use]
    pub const fn with(self, flag: NotificationLevel) -> Self {
        NotificationLevel(self.0 | flag.0)
    }

    pub const fn contains(self, flag: NotificationLevel) -> bool {
        self.0 & flag.0 == flag.0
    }

    pub fn from_flags(goalscorer: bool, yellow: bool, red: bool) -> Self {
        let mut level = Self::empty();
        if goalscorer {
            level = level.with(Self::GOALSCORER);
        }
        if yellow {
            level = level.with(Self::YELLOW);
        }
        if red {
            level = level.with(Self::RED);
        }
        level
    }
}

/// How much per-event context goes into a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailMode {
    #[default]
    Off,
    Simple,
    Advanced,
}

impl DetailMode {
    /// Advanced requires detailed match data; without it the pipeline
    /// degrades to simple rather than failing.
    pub fn resolve(detailed: bool, advanced: bool) -> Self {
        match (detailed, advanced) {
            (false, _) => DetailMode::Off,
            (true, false) => DetailMode::Simple,
            (true, true) => DetailMode::Advanced,
        }
    }

    pub fn is_detailed(self) -> bool {
        self != DetailMode::Off
    }
}

/// Runtime configuration populated from the settings store.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub alerts_enabled: bool,
    pub show_goalscorer: bool,
    pub show_yellow: bool,
    pub show_red: bool,
    pub detailed: bool,
    pub advanced: bool,
    pub notification_timeout_ms: u64,
    pub render_workers: usize,
    pub feed_url: String,
    pub poll_interval_secs: u64,
    pub score_refresh_ticks: u32,
    pub font_path: String,
    pub media_dir: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            alerts_enabled: true,
            show_goalscorer: true,
            show_yellow: false,
            show_red: true,
            detailed: false,
            advanced: false,
            notification_timeout_ms: 2000,
            render_workers: 5,
            feed_url: String::new(),
            poll_interval_secs: 5,
            score_refresh_ticks: 12,
            font_path: String::new(),
            media_dir: String::new(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from the settings store (file-first, env
    /// overrides).
    pub fn load(store: &SettingsStore) -> Result<Self, StoreError> {
        let raw = store.snapshot()?;
        let g = |key: &str| -> String { raw.get(key).cloned().unwrap_or_default() };

        let mut feed_url = g("FEED_URL");
        if let Ok(v) = std::env::var("FEED_URL") {
            if !v.is_empty() {
                feed_url = v;
            }
        }

        let mut notification_timeout_ms = parse_u64(&g("NOTIFICATION_TIMEOUT_MS"), 2000);
        if let Ok(v) = std::env::var("NOTIFICATION_TIMEOUT_MS") {
            if let Ok(ms) = v.parse::<u64>() {
                notification_timeout_ms = ms;
            }
        }

        Ok(Self {
            alerts_enabled: g("ALERTS_ENABLED") == "true",
            show_goalscorer: g("NOTIFY_GOALSCORER") == "true",
            show_yellow: g("NOTIFY_YELLOW_CARDS") == "true",
            show_red: g("NOTIFY_RED_CARDS") == "true",
            detailed: g("DETAILED_DATA") == "true",
            advanced: g("ADVANCED_NOTIFICATIONS") == "true",
            notification_timeout_ms: notification_timeout_ms.max(500),
            render_workers: parse_usize(&g("RENDER_WORKERS"), 5).clamp(1, 16),
            feed_url,
            poll_interval_secs: parse_u64(&g("POLL_INTERVAL_SECS"), 5).max(1),
            score_refresh_ticks: parse_u32(&g("SCORE_REFRESH_TICKS"), 12).max(1),
            font_path: g("FONT_PATH"),
            media_dir: g("MEDIA_DIR"),
        })
    }

    /// The level bitmask derived from the individual flags.
    pub fn level(&self) -> NotificationLevel {
        NotificationLevel::from_flags(self.show_goalscorer, self.show_yellow, self.show_red)
    }

    /// Compare against a previous snapshot and return the keys whose
    /// values differ. Called once per settings reload cycle.
    pub fn changed_keys(&self, previous: &ServiceConfig) -> Vec<&'static str> {
        let mut changed = Vec::new();
        macro_rules! diff {
            ($field:ident, $key:literal) => {
                if self.$field != previous.$field {
                    changed.push($key);
                }
            };
        }
        diff!(alerts_enabled, "ALERTS_ENABLED");
        diff!(show_goalscorer, "NOTIFY_GOALSCORER");
        diff!(show_yellow, "NOTIFY_YELLOW_CARDS");
        diff!(show_red, "NOTIFY_RED_CARDS");
        diff!(detailed, "DETAILED_DATA");
        diff!(advanced, "ADVANCED_NOTIFICATIONS");
        diff!(notification_timeout_ms, "NOTIFICATION_TIMEOUT_MS");
        diff!(render_workers, "RENDER_WORKERS");
        diff!(feed_url, "FEED_URL");
        diff!(poll_interval_secs, "POLL_INTERVAL_SECS");
        diff!(score_refresh_ticks, "SCORE_REFRESH_TICKS");
        diff!(font_path, "FONT_PATH");
        diff!(media_dir, "MEDIA_DIR");
        changed
    }
}

fn parse_u64(s: &str, default: u64) -> u64 {
    if s.is_empty() {
        return default;
    }
    s.parse().unwrap_or(default)
}

fn parse_u32(s: &str, default: u32) -> u32 {
    if s.is_empty() {
        return default;
    }
    s.parse().unwrap_or(default)
}

fn parse_usize(s: &str, default: usize) -> usize {
    if s.is_empty() {
        return default;
    }
    s.parse().unwrap_or(default)
}
