//! Client-side shopping cart kept in an origin-scoped key/value slot.
//!
//! Several UI surfaces (product page, cart drawer, checkout page, header
//! badge) each hold their own [`CartBinding`]. A binding mutates through the
//! pure functions in [`cart`], persists through [`CartStore`], and announces
//! the write on the in-tab and cross-tab channels of the [`bus`]. Every other
//! binding, in this tab or another tab of the same [`Origin`], reloads.
//!
//! ```
//! use cart_sync::{CartBinding, ItemId, LineItem, Origin};
//!
//! let origin = Origin::in_memory();
//! let tab_a = origin.open_tab();
//! let tab_b = origin.open_tab();
//!
//! let detail = CartBinding::mount(&tab_a, "detail").unwrap();
//! let drawer = CartBinding::mount(&tab_b, "drawer").unwrap();
//!
//! detail.add_item(LineItem::new(1, "TV", 500.0));
//! detail.add_item(LineItem::new(1, "TV", 500.0));
//! origin.settle();
//!
//! assert_eq!(drawer.snapshot().get(&ItemId::from(1)).unwrap().quantity, 2);
//! ```

mod binding;
pub mod bus;
pub mod cart;
pub mod checkout;
mod config;
mod error;
mod origin;
pub mod storage;
mod store;

pub use binding::{BindingPhase, CartBinding};
pub use bus::{ChangeChannel, ChangeNotice, Channel, TabId, WriteMarker};
pub use cart::{Cart, CartSummary, ItemId, LineItem};
pub use checkout::{
    Checkout, CheckoutError, CheckoutReceipt, CustomerDetails, InMemoryOrderService,
    OrderService, OrderServiceError, RemoteOrder,
};
pub use config::StorefrontConfig;
pub use error::{BusError, StorageError};
pub use origin::{Origin, Tab};
pub use storage::{InMemoryStorage, JsonFileStorage, KeyValueStorage};
pub use store::{CartStore, OrderHistory, OrderRecord};

#[cfg(feature = "http")]
pub use checkout::HttpOrderService;
