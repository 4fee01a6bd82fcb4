use std::sync::Arc;

use tracing::warn;

use crate::bus::{ChangeNotice, CrossTabSubscriber, LocalChannel, TabId, WriteMarker};
use crate::cart::Cart;
use crate::config::StorefrontConfig;
use crate::storage::KeyValueStorage;
use crate::store::{CartStore, OrderHistory};

use super::origin::Origin;

/// One document of an origin.
///
/// Cheap to clone; clones are the same tab (same id, same in-tab channel).
#[derive(Clone)]
pub struct Tab {
    id: TabId,
    origin: Origin,
    local: LocalChannel,
}

impl Tab {
    pub(crate) fn new(id: TabId, origin: Origin) -> Self {
        Self {
            id,
            origin,
            local: LocalChannel::new(),
        }
    }

    pub fn id(&self) -> TabId {
        self.id
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn config(&self) -> &StorefrontConfig {
        self.origin.config()
    }

    pub fn storage(&self) -> Arc<dyn KeyValueStorage> {
        self.origin.storage()
    }

    pub fn local(&self) -> &LocalChannel {
        &self.local
    }

    pub fn cross_tab(&self) -> CrossTabSubscriber {
        self.origin.cross_tab().for_tab(self.id)
    }

    pub fn cart_store(&self) -> CartStore {
        CartStore::new(self.storage(), self.config().cart_key.clone())
    }

    pub fn history(&self) -> OrderHistory {
        OrderHistory::new(self.storage(), self.config().history_key.clone())
    }

    pub fn next_marker(&self) -> WriteMarker {
        self.origin.next_marker()
    }

    /// Tell this tab's subscribers, then every other tab, that `key` changed.
    ///
    /// Bus failures are logged: a missed notice leaves views stale until the
    /// next one, it never fails the write that preceded it.
    pub fn announce(&self, key: &str, marker: WriteMarker) {
        let notice = ChangeNotice::new(key, marker, self.id);
        if let Err(err) = self.local.publish(&notice) {
            warn!(tab = %self.id, key, error = %err, "local notice not delivered");
        }
        if let Err(err) = self.origin.cross_tab().dispatch(&notice) {
            warn!(tab = %self.id, key, error = %err, "cross-tab notice not dispatched");
        }
    }

    /// Persist `cart` and announce it. For writers that are not bindings.
    pub fn write_cart(&self, cart: &Cart) -> WriteMarker {
        let store = self.cart_store();
        let marker = self.next_marker();
        store.save(cart);
        self.announce(store.key(), marker);
        marker
    }

    /// Remove the cart slot and announce it.
    pub fn clear_cart(&self) -> WriteMarker {
        let store = self.cart_store();
        let marker = self.next_marker();
        store.clear();
        self.announce(store.key(), marker);
        marker
    }
}
