use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::bus::{CrossTabChannel, TabId, WriteMarker};
use crate::config::StorefrontConfig;
use crate::storage::{InMemoryStorage, KeyValueStorage};

use super::tab::Tab;

/// Everything the tabs of one origin share. Cloning shares it too.
#[derive(Clone)]
pub struct Origin {
    storage: Arc<dyn KeyValueStorage>,
    cross_tab: CrossTabChannel,
    markers: Arc<AtomicU64>,
    tabs: Arc<AtomicU64>,
    config: Arc<StorefrontConfig>,
}

impl Origin {
    pub fn new(storage: impl KeyValueStorage + 'static, config: StorefrontConfig) -> Self {
        Self {
            storage: Arc::new(storage),
            cross_tab: CrossTabChannel::new(),
            markers: Arc::new(AtomicU64::new(1)),
            tabs: Arc::new(AtomicU64::new(1)),
            config: Arc::new(config),
        }
    }

    /// Fresh in-memory origin with the default storefront settings.
    pub fn in_memory() -> Self {
        Self::new(InMemoryStorage::new(), StorefrontConfig::default())
    }

    /// Open a new tab. Tabs see the same slots and hear each other's writes.
    pub fn open_tab(&self) -> Tab {
        let id = TabId(self.tabs.fetch_add(1, Ordering::Relaxed));
        debug!(tab = %id, "tab opened");
        Tab::new(id, self.clone())
    }

    pub fn storage(&self) -> Arc<dyn KeyValueStorage> {
        Arc::clone(&self.storage)
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn cross_tab(&self) -> &CrossTabChannel {
        &self.cross_tab
    }

    pub fn next_marker(&self) -> WriteMarker {
        WriteMarker(self.markers.fetch_add(1, Ordering::Relaxed))
    }

    /// Wait until every cross-tab notice dispatched so far has been handled.
    pub fn settle(&self) {
        self.cross_tab.settle();
    }
}
