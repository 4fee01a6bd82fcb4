//! Change notification bus.
//!
//! Two named channels carry a [`ChangeNotice`] whenever a persisted slot
//! changes:
//!
//! ```text
//!            write in tab A
//!                  │
//!        ┌─────────┴──────────┐
//!        ▼                    ▼
//! ┌──────────────┐    ┌────────────────┐
//! │ LocalChannel │    │ CrossTabChannel│
//! │ (tab A only, │    │ (every tab but │
//! │  synchronous)│    │  A, threaded)  │
//! └──────────────┘    └────────────────┘
//! ```
//!
//! Subscribers see both through the same [`ChangeChannel`] trait, so another
//! message-passing primitive can stand in for either one.

mod channel;
mod cross_tab;
mod local;
mod notice;

pub use channel::{ChangeChannel, Listener, SubscriptionId};
pub use cross_tab::{CrossTabChannel, CrossTabSubscriber};
pub use local::LocalChannel;
pub use notice::{Channel, ChangeNotice, TabId, WriteMarker};
