//! File-backed settings store.
//!
//! Settings live in a flat JSON object of string values, the shape the
//! companion settings screen writes. The store itself is stateless;
//! change detection happens in [`super::ServiceConfig::changed_keys`].

use std::collections::HashMap;
use std::path::PathBuf;

use super::defaults::DEFAULT_SETTINGS;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("settings file unreadable: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings file malformed: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read every setting, filling in defaults for missing keys.
    ///
    /// A read or parse failure surfaces as an error so the caller can
    /// keep its previous values ("no change" semantics).
    pub fn snapshot(&self) -> Result<HashMap<String, String>, StoreError> {
        let raw = std::fs::read_to_string(&self.path)?;
        let mut values: HashMap<String, String> = serde_json::from_str(&raw)?;

        for (key, def) in DEFAULT_SETTINGS.iter() {
            values
                .entry((*key).to_string())
                .or_insert_with(|| def.default.to_string());
        }
        Ok(values)
    }

    /// Create the settings file with defaults if it does not exist yet.
    pub fn initialize_defaults(&self) -> Result<(), StoreError> {
        if self.path.exists() {
            return Ok(());
        }
        let values: HashMap<String, String> = DEFAULT_SETTINGS
            .iter()
            .map(|(key, def)| ((*key).to_string(), def.default.to_string()))
            .collect();
        self.write_all(&values)?;
        tracing::info!("Created default settings at {}", self.path.display());
        Ok(())
    }

    fn write_all(&self, values: &HashMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(values)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> (SettingsStore, PathBuf) {
        let path = std::env::temp_dir().join(format!(
            "matchday-store-{}-{name}.json",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        (SettingsStore::new(path.clone()), path)
    }

    #[test]
    fn missing_file_is_an_error_not_defaults() {
        let (store, _) = temp_store("missing");
        assert!(store.snapshot().is_err());
    }

    #[test]
    fn initialize_then_pick_up_external_edit() {
        let (store, path) = temp_store("roundtrip");
        store.initialize_defaults().unwrap();

        let snap = store.snapshot().unwrap();
        assert_eq!(snap.get("ALERTS_ENABLED").map(String::as_str), Some("true"));

        // the settings screen rewrites the file between polls
        let mut values = snap;
        values.insert("NOTIFY_YELLOW_CARDS".into(), "true".into());
        std::fs::write(&path, serde_json::to_string(&values).unwrap()).unwrap();

        let snap = store.snapshot().unwrap();
        assert_eq!(
            snap.get("NOTIFY_YELLOW_CARDS").map(String::as_str),
            Some("true")
        );
        // untouched keys keep their defaults
        assert_eq!(snap.get("RENDER_WORKERS").map(String::as_str), Some("5"));
    }

    #[test]
    fn malformed_file_reports_parse_error() {
        let (store, path) = temp_store("malformed");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(store.snapshot(), Err(StoreError::Parse(_))));
    }
}
