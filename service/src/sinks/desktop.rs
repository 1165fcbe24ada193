//! Desktop toast sink backed by notify-rust.

use std::path::Path;

use notify_rust::{Notification, Timeout};

use super::DisplaySink;

/// Shows standard notifications as OS toasts.
#[derive(Debug, Clone)]
pub struct DesktopSink {
    app_name: String,
}

impl DesktopSink {
    pub fn new() -> Self {
        Self {
            app_name: "matchday".into(),
        }
    }
}

impl Default for DesktopSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySink for DesktopSink {
    fn show(
        &self,
        title: &str,
        message: &str,
        icon: Option<&Path>,
        timeout_ms: u64,
    ) -> Result<(), anyhow::Error> {
        let mut toast = Notification::new();
        toast
            .appname(&self.app_name)
            .summary(title)
            .body(message)
            .timeout(Timeout::Milliseconds(timeout_ms.min(u32::MAX as u64) as u32));

        if let Some(icon) = icon {
            toast.icon(&icon.to_string_lossy());
        }

        toast.show()?;
        Ok(())
    }
}
