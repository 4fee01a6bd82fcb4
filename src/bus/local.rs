use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::error::BusError;

use super::channel::{ChangeChannel, Listener, SubscriptionId};
use super::notice::{Channel, ChangeNotice};

/// In-tab channel: an observer list called synchronously on publish.
///
/// Every live subscriber of the tab is called, including the one whose write
/// produced the notice. Listeners are snapshotted before delivery, so a
/// listener may subscribe or unsubscribe while being called.
#[derive(Clone, Default)]
pub struct LocalChannel {
    listeners: Arc<RwLock<Vec<(SubscriptionId, Listener)>>>,
    seq: Arc<AtomicU64>,
}

impl LocalChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `notice` to every subscriber and return how many were called.
    pub fn publish(&self, notice: &ChangeNotice) -> Result<usize, BusError> {
        let listeners: Vec<Listener> = self
            .listeners
            .read()
            .map_err(|_| BusError::LockPoisoned("local publish"))?
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        let notice = notice.clone().on(Channel::Local);
        for listener in &listeners {
            listener(&notice);
        }
        debug!(key = %notice.key, marker = %notice.marker, delivered = listeners.len(), "local notice");
        Ok(listeners.len())
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.read().map(|l| l.len()).unwrap_or(0)
    }
}

impl ChangeChannel for LocalChannel {
    fn subscribe(&self, listener: Listener) -> Result<SubscriptionId, BusError> {
        let id = SubscriptionId(format!("local-{}", self.seq.fetch_add(1, Ordering::Relaxed)));
        self.listeners
            .write()
            .map_err(|_| BusError::LockPoisoned("local subscribe"))?
            .push((id.clone(), listener));
        Ok(id)
    }

    fn unsubscribe(&self, id: &SubscriptionId) -> Result<bool, BusError> {
        let mut listeners = self
            .listeners
            .write()
            .map_err(|_| BusError::LockPoisoned("local unsubscribe"))?;
        let before = listeners.len();
        listeners.retain(|(existing, _)| existing != id);
        Ok(listeners.len() != before)
    }
}
