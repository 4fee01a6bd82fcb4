//! Origins and tabs.
//!
//! An [`Origin`] owns what every tab shares: the slot storage, the cross-tab
//! channel and the write-marker sequence. A [`Tab`] is one independent
//! document of that origin with its own in-tab channel.

mod origin;
mod tab;

pub use origin::Origin;
pub use tab::Tab;
