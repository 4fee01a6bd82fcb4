use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tracing::{debug, warn};

use crate::bus::{ChangeChannel, ChangeNotice, Listener, SubscriptionId, WriteMarker};
use crate::cart::{self, Cart, CartSummary, ItemId, LineItem};
use crate::error::BusError;
use crate::origin::Tab;
use crate::store::CartStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BindingPhase {
    Uninitialized,
    Loaded,
    /// Torn down; notices are ignored and mutations write nothing.
    Detached,
}

#[derive(Debug)]
struct BindingState {
    phase: BindingPhase,
    snapshot: Cart,
    /// Marker of this binding's last write whose echo has not come back yet.
    armed: Option<WriteMarker>,
    reloads: u64,
    suppressed: u64,
}

/// One UI surface's live view of the cart (drawer, detail page, badge, ...).
///
/// The binding keeps its own snapshot. Local mutations update it immediately
/// and are announced on both channels; notices from anyone else make it
/// reload from storage. The notice produced by its own write carries the
/// marker it armed before writing and is skipped.
///
/// ```
/// use cart_sync::{CartBinding, LineItem, Origin};
///
/// let origin = Origin::in_memory();
/// let tab = origin.open_tab();
/// let drawer = CartBinding::mount(&tab, "drawer").unwrap();
/// let badge = CartBinding::mount(&tab, "badge").unwrap();
///
/// drawer.add_item(LineItem::new(1, "TV", 500.0));
/// assert_eq!(badge.summary().units, 1);
/// assert_eq!(drawer.reload_count(), 0);
/// ```
pub struct CartBinding {
    name: String,
    tab: Tab,
    store: CartStore,
    state: Arc<Mutex<BindingState>>,
    local_subscription: Option<SubscriptionId>,
    cross_tab_subscription: Option<SubscriptionId>,
}

impl CartBinding {
    /// Start listening on both channels, then load the cart once.
    ///
    /// Subscribing first means a write landing during the load is either in
    /// the loaded value or followed by a notice that reloads it.
    pub fn mount(tab: &Tab, name: impl Into<String>) -> Result<Self, BusError> {
        let mut binding = Self {
            name: name.into(),
            tab: tab.clone(),
            store: tab.cart_store(),
            state: Arc::new(Mutex::new(BindingState {
                phase: BindingPhase::Uninitialized,
                snapshot: Cart::new(),
                armed: None,
                reloads: 0,
                suppressed: 0,
            })),
            local_subscription: None,
            cross_tab_subscription: None,
        };
        binding.local_subscription = Some(tab.local().subscribe(binding.listener())?);
        binding.cross_tab_subscription = Some(tab.cross_tab().subscribe(binding.listener())?);

        {
            let mut state = lock(&binding.state);
            state.snapshot = binding.store.load();
            state.phase = BindingPhase::Loaded;
        }
        debug!(binding = %binding.name, tab = %tab.id(), "binding mounted");
        Ok(binding)
    }

    fn listener(&self) -> Listener {
        let state = Arc::downgrade(&self.state);
        let store = self.store.clone();
        let name = self.name.clone();
        Arc::new(move |notice: &ChangeNotice| on_notice(&state, &store, &name, notice))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tab(&self) -> &Tab {
        &self.tab
    }

    pub fn phase(&self) -> BindingPhase {
        lock(&self.state).phase
    }

    pub fn snapshot(&self) -> Cart {
        lock(&self.state).snapshot.clone()
    }

    pub fn summary(&self) -> CartSummary {
        lock(&self.state).snapshot.summary()
    }

    /// How many times a notice made this binding reload from storage.
    pub fn reload_count(&self) -> u64 {
        lock(&self.state).reloads
    }

    /// How many of its own echoes this binding skipped.
    pub fn suppressed_count(&self) -> u64 {
        lock(&self.state).suppressed
    }

    pub fn add_item(&self, item: LineItem) -> Cart {
        self.apply(|current| cart::add_or_increment(current, item))
    }

    pub fn change_quantity(&self, id: &ItemId, delta: i64) -> Cart {
        self.apply(|current| cart::set_quantity_delta(current, id, delta))
    }

    pub fn remove_item(&self, id: &ItemId) -> Cart {
        self.apply(|current| cart::remove(current, id))
    }

    pub fn clear(&self) -> Cart {
        self.apply(|_| cart::clear())
    }

    /// Run `transition` on the current snapshot, persist and announce it.
    ///
    /// A transition that changes nothing writes nothing. The state lock is
    /// released before announcing, since this binding's own listener takes it.
    pub fn apply(&self, transition: impl FnOnce(&Cart) -> Cart) -> Cart {
        let (next, marker) = {
            let mut state = lock(&self.state);
            if state.phase == BindingPhase::Detached {
                return state.snapshot.clone();
            }
            let next = transition(&state.snapshot);
            if next == state.snapshot {
                return next;
            }
            let marker = self.tab.next_marker();
            state.armed = Some(marker);
            self.store.save(&next);
            state.snapshot = next.clone();
            (next, marker)
        };
        debug!(binding = %self.name, marker = %marker, lines = next.len(), "cart written");
        self.tab.announce(self.store.key(), marker);
        next
    }

    /// Unsubscribe from both channels. Also runs on drop.
    pub fn teardown(mut self) {
        self.detach();
    }

    fn detach(&mut self) {
        if let Some(id) = self.local_subscription.take() {
            if let Err(err) = self.tab.local().unsubscribe(&id) {
                warn!(binding = %self.name, error = %err, "local unsubscribe failed");
            }
        }
        if let Some(id) = self.cross_tab_subscription.take() {
            if let Err(err) = self.tab.cross_tab().unsubscribe(&id) {
                warn!(binding = %self.name, error = %err, "cross-tab unsubscribe failed");
            }
        }
        let mut state = lock(&self.state);
        if state.phase != BindingPhase::Detached {
            state.phase = BindingPhase::Detached;
            debug!(binding = %self.name, "binding detached");
        }
    }
}

impl Drop for CartBinding {
    fn drop(&mut self) {
        self.detach();
    }
}

fn on_notice(state: &Weak<Mutex<BindingState>>, store: &CartStore, name: &str, notice: &ChangeNotice) {
    if notice.key != store.key() {
        return;
    }
    let Some(state) = state.upgrade() else {
        return;
    };
    let mut state = lock(&state);
    if state.phase == BindingPhase::Detached {
        return;
    }
    if state.armed == Some(notice.marker) {
        state.armed = None;
        state.suppressed += 1;
        debug!(binding = name, marker = %notice.marker, "own notice skipped");
        return;
    }
    state.snapshot = store.load();
    state.phase = BindingPhase::Loaded;
    state.reloads += 1;
    debug!(
        binding = name,
        marker = %notice.marker,
        channel = ?notice.channel,
        lines = state.snapshot.len(),
        "reloaded after notice"
    );
}

/// Binding state is replaced wholesale under the lock, so a poisoned lock
/// still holds a consistent value.
fn lock(state: &Mutex<BindingState>) -> MutexGuard<'_, BindingState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
