use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use event_emitter_rs::EventEmitter;
use tracing::{debug, warn};

use crate::error::BusError;

use super::channel::{ChangeChannel, Listener, SubscriptionId};
use super::notice::{Channel, ChangeNotice, TabId};

const STORAGE_EVENT: &str = "storage";

/// Origin-wide channel standing in for the browser's storage event.
///
/// A dispatched notice reaches every subscriber whose tab is not the notice's
/// source, each on its own thread, the way another document's event loop
/// picks the event up on its own schedule. Call [`settle`](Self::settle) to
/// wait for in-flight deliveries.
#[derive(Clone)]
pub struct CrossTabChannel {
    emitter: Arc<Mutex<EventEmitter>>,
    in_flight: Arc<Mutex<Vec<JoinHandle<()>>>>,
    listeners: Arc<AtomicUsize>,
}

impl Default for CrossTabChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl CrossTabChannel {
    pub fn new() -> Self {
        Self {
            emitter: Arc::new(Mutex::new(EventEmitter::new())),
            in_flight: Arc::new(Mutex::new(Vec::new())),
            listeners: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Subscription handle for the tab `tab`.
    pub fn for_tab(&self, tab: TabId) -> CrossTabSubscriber {
        CrossTabSubscriber {
            tab,
            channel: self.clone(),
        }
    }

    /// Fan `notice` out to the other tabs without waiting for delivery.
    pub fn dispatch(&self, notice: &ChangeNotice) -> Result<(), BusError> {
        let notice = notice.clone().on(Channel::CrossTab);
        let handles = self
            .emitter
            .lock()
            .map_err(|_| BusError::LockPoisoned("cross-tab dispatch"))?
            .emit(STORAGE_EVENT, notice.clone());
        debug!(key = %notice.key, marker = %notice.marker, source = %notice.source, "cross-tab notice");
        let mut in_flight = self
            .in_flight
            .lock()
            .map_err(|_| BusError::LockPoisoned("cross-tab dispatch"))?;
        in_flight.retain(|handle| !handle.is_finished());
        in_flight.extend(handles);
        Ok(())
    }

    /// Listeners registered by every tab.
    pub fn listener_count(&self) -> usize {
        self.listeners.load(Ordering::SeqCst)
    }

    /// Block until every dispatched notice has been handled.
    pub fn settle(&self) {
        loop {
            let pending: Vec<JoinHandle<()>> = match self.in_flight.lock() {
                Ok(mut in_flight) => in_flight.drain(..).collect(),
                Err(_) => {
                    warn!("cross-tab delivery list poisoned; nothing to settle");
                    return;
                }
            };
            if pending.is_empty() {
                return;
            }
            for handle in pending {
                if handle.join().is_err() {
                    warn!("cross-tab listener panicked");
                }
            }
        }
    }
}

/// One tab's view of the [`CrossTabChannel`]: it only hears other tabs.
#[derive(Clone)]
pub struct CrossTabSubscriber {
    tab: TabId,
    channel: CrossTabChannel,
}

impl CrossTabSubscriber {
    pub fn tab(&self) -> TabId {
        self.tab
    }
}

impl ChangeChannel for CrossTabSubscriber {
    fn subscribe(&self, listener: Listener) -> Result<SubscriptionId, BusError> {
        let own_tab = self.tab;
        let id = self
            .channel
            .emitter
            .lock()
            .map_err(|_| BusError::LockPoisoned("cross-tab subscribe"))?
            .on(STORAGE_EVENT, move |notice: ChangeNotice| {
                if notice.source != own_tab {
                    listener(&notice);
                }
            });
        self.channel.listeners.fetch_add(1, Ordering::SeqCst);
        Ok(SubscriptionId(id))
    }

    fn unsubscribe(&self, id: &SubscriptionId) -> Result<bool, BusError> {
        let removed = self
            .channel
            .emitter
            .lock()
            .map_err(|_| BusError::LockPoisoned("cross-tab unsubscribe"))?
            .remove_listener(&id.0);
        if removed.is_some() {
            self.channel.listeners.fetch_sub(1, Ordering::SeqCst);
        }
        Ok(removed.is_some())
    }
}
