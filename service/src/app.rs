use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::config::{ServiceConfig, SettingsStore};

/// Application shared state accessible from every background loop.
#[derive(Clone)]
pub struct SharedState {
    inner: Arc<SharedStateInner>,
}

struct SharedStateInner {
    /// Service configuration (reloadable)
    config: RwLock<ServiceConfig>,
    /// Settings store handle
    store: SettingsStore,
    /// Cancelled once on shutdown; every loop selects on it
    shutdown: CancellationToken,
    /// Data directory path
    data_dir: PathBuf,
}

impl SharedState {
    /// Create shared state from an already-opened store and loaded config.
    pub fn new(store: SettingsStore, config: ServiceConfig, data_dir: PathBuf) -> Self {
        Self {
            inner: Arc::new(SharedStateInner {
                config: RwLock::new(config),
                store,
                shutdown: CancellationToken::new(),
                data_dir,
            }),
        }
    }

    pub fn store(&self) -> &SettingsStore {
        &self.inner.store
    }

    pub fn data_dir(&self) -> &PathBuf {
        &self.inner.data_dir
    }

    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.inner.shutdown
    }

    /// Get a read lock on the current config.
    pub async fn config(&self) -> tokio::sync::RwLockReadGuard<'_, ServiceConfig> {
        self.inner.config.read().await
    }

    /// Swap in a freshly loaded config, returning the previous one.
    pub async fn replace_config(&self, config: ServiceConfig) -> ServiceConfig {
        let mut guard = self.inner.config.write().await;
        std::mem::replace(&mut guard, config)
    }
}
