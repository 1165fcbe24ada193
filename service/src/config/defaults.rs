//! All setting definitions with their default values.

use std::collections::HashMap;
use std::sync::LazyLock;

/// A single setting definition.
#[derive(Debug, Clone)]
pub struct SettingDef {
    pub key: &'static str,
    pub default: &'static str,
    pub description: &'static str,
}

const DEFS: &[(&str, &str, &str)] = &[
    ("ALERTS_ENABLED", "true", "Master switch for match alerts"),
    ("NOTIFY_GOALSCORER", "true", "Include scorer detail in goal alerts"),
    ("NOTIFY_YELLOW_CARDS", "false", "Alert on yellow cards"),
    ("NOTIFY_RED_CARDS", "true", "Alert on red cards"),
    ("DETAILED_DATA", "false", "Detailed match data is available from the feed"),
    ("ADVANCED_NOTIFICATIONS", "false", "Render bitmap notifications for the overlay"),
    ("NOTIFICATION_TIMEOUT_MS", "2000", "How long each notification stays visible"),
    ("RENDER_WORKERS", "5", "Render worker pool size for advanced notifications"),
    ("FEED_URL", "", "JSON endpoint serving current match states"),
    ("POLL_INTERVAL_SECS", "5", "Service tick interval"),
    ("SCORE_REFRESH_TICKS", "12", "Scores are refreshed every Nth tick"),
    ("FONT_PATH", "", "TTF/OTF font used for rendered notifications"),
    ("MEDIA_DIR", "", "Directory holding standard notification icons"),
];

/// Global setting definitions indexed by key.
pub static DEFAULT_SETTINGS: LazyLock<HashMap<&'static str, SettingDef>> = LazyLock::new(|| {
    DEFS.iter()
        .map(|&(key, default, description)| {
            (
                key,
                SettingDef {
                    key,
                    default,
                    description,
                },
            )
        })
        .collect()
});
