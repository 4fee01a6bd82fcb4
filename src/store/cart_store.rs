use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::cart::Cart;
use crate::error::StorageError;
use crate::storage::KeyValueStorage;

/// Codec between a [`Cart`] and its JSON slot.
///
/// The whole cart is the unit of persistence: `save` replaces the slot, there
/// are no partial writes.
///
/// # Lost updates
///
/// Nothing here is atomic. If two tabs `load` the same cart and each `save`
/// its own mutation of it, the later `save` wins and the other tab's change is
/// gone without any error. Callers accept last-writer-wins.
#[derive(Clone)]
pub struct CartStore {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
}

impl CartStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the cart. An absent, unreadable or corrupt slot is an empty cart.
    pub fn load(&self) -> Cart {
        match self.try_load() {
            Ok(cart) => cart,
            Err(err) => {
                warn!(key = %self.key, error = %err, "cart slot unreadable, using empty cart");
                Cart::new()
            }
        }
    }

    pub fn try_load(&self) -> Result<Cart, StorageError> {
        match self.storage.get_item(&self.key)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Cart::new()),
        }
    }

    /// Replace the slot with `cart`. Failures are logged, never returned.
    pub fn save(&self, cart: &Cart) {
        if let Err(err) = self.try_save(cart) {
            error!(key = %self.key, error = %err, "cart slot not written");
        }
    }

    pub fn try_save(&self, cart: &Cart) -> Result<(), StorageError> {
        let raw = serde_json::to_string(cart)?;
        self.storage.set_item(&self.key, &raw)?;
        debug!(key = %self.key, lines = cart.len(), "cart saved");
        Ok(())
    }

    /// Remove the slot entirely; a later `load` sees an empty cart.
    pub fn clear(&self) {
        match self.storage.remove_item(&self.key) {
            Ok(existed) => debug!(key = %self.key, existed, "cart slot cleared"),
            Err(err) => error!(key = %self.key, error = %err, "cart slot not cleared"),
        }
    }
}
