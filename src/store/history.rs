use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::cart::Cart;
use crate::error::StorageError;
use crate::storage::KeyValueStorage;

/// A completed purchase as remembered locally. Never mutated once written.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Checkout time in epoch milliseconds.
    pub id: i64,
    #[serde(rename = "fecha")]
    pub placed_at: DateTime<Utc>,
    #[serde(rename = "productos")]
    pub items: Cart,
    pub total: f64,
}

impl OrderRecord {
    pub fn from_cart(cart: Cart, placed_at: DateTime<Utc>) -> Self {
        Self {
            id: placed_at.timestamp_millis(),
            placed_at,
            total: cart.total(),
            items: cart,
        }
    }
}

/// Append-only list of [`OrderRecord`]s in its own slot.
///
/// Same sharing rules as the cart slot: read-modify-write with no locking
/// across tabs.
#[derive(Clone)]
pub struct OrderHistory {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
}

impl OrderHistory {
    pub fn new(storage: Arc<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// All recorded orders, oldest first. Unreadable history is empty.
    pub fn load(&self) -> Vec<OrderRecord> {
        match self.try_load() {
            Ok(orders) => orders,
            Err(err) => {
                warn!(key = %self.key, error = %err, "order history unreadable, using empty history");
                Vec::new()
            }
        }
    }

    pub fn try_load(&self) -> Result<Vec<OrderRecord>, StorageError> {
        match self.storage.get_item(&self.key)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    pub fn append(&self, record: OrderRecord) {
        if let Err(err) = self.try_append(record) {
            error!(key = %self.key, error = %err, "order not recorded in history");
        }
    }

    /// Fails without writing when the existing history cannot be read, so
    /// earlier orders are never overwritten.
    pub fn try_append(&self, record: OrderRecord) -> Result<(), StorageError> {
        let mut orders = self.try_load()?;
        orders.push(record);
        let raw = serde_json::to_string(&orders)?;
        self.storage.set_item(&self.key, &raw)
    }
}
