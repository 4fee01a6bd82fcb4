use std::fmt;

use serde::{Deserialize, Serialize};

/// Origin-unique tag carried by a write and the notice it produces.
///
/// Markers grow monotonically per origin, so a binding can tell its own echo
/// apart from any other write without relying on delivery timing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WriteMarker(pub u64);

impl fmt::Display for WriteMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{}", self.0)
    }
}

/// Identity of one tab (document) of an origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TabId(pub u64);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tab-{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Channel {
    /// Same tab, delivered before the write call returns.
    Local,
    /// Other tabs of the origin, delivered asynchronously.
    CrossTab,
}

/// "Slot `key` changed", as announced by the tab that wrote it.
///
/// Carries no value: receivers reload the slot themselves.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeNotice {
    pub key: String,
    pub marker: WriteMarker,
    pub source: TabId,
    pub channel: Channel,
}

impl ChangeNotice {
    pub fn new(key: impl Into<String>, marker: WriteMarker, source: TabId) -> Self {
        Self {
            key: key.into(),
            marker,
            source,
            channel: Channel::Local,
        }
    }

    pub fn on(mut self, channel: Channel) -> Self {
        self.channel = channel;
        self
    }
}
