use std::fmt;
use std::sync::Arc;

use crate::error::BusError;

use super::notice::ChangeNotice;

/// Callback invoked for every notice a subscription receives.
pub type Listener = Arc<dyn Fn(&ChangeNotice) + Send + Sync>;

/// Handle returned by [`ChangeChannel::subscribe`], used to unsubscribe.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub String);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Subscription side of a notification channel.
///
/// Delivery is best-effort and fire-and-forget: a listener that is gone
/// simply stops receiving, nobody waits on acknowledgements.
pub trait ChangeChannel: Send + Sync {
    fn subscribe(&self, listener: Listener) -> Result<SubscriptionId, BusError>;

    /// Stop delivering to `id`. Returns false if it was not subscribed.
    fn unsubscribe(&self, id: &SubscriptionId) -> Result<bool, BusError>;
}
