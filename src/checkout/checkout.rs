use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::bus::WriteMarker;
use crate::origin::Tab;
use crate::store::OrderRecord;

use super::error::CheckoutError;
use super::service::{CustomerDetails, OrderService, RemoteOrder};

/// Outcome of a successful purchase.
#[derive(Clone, Debug, PartialEq)]
pub struct CheckoutReceipt {
    /// What was appended to the local order history.
    pub order: OrderRecord,
    /// The order as the backend confirmed it.
    pub remote: RemoteOrder,
    /// Marker of the write that cleared the cart.
    pub marker: WriteMarker,
}

/// The checkout page's purchase action.
pub struct Checkout<S: OrderService> {
    tab: Tab,
    service: S,
}

impl<S: OrderService> Checkout<S> {
    pub fn new(tab: &Tab, service: S) -> Self {
        Self {
            tab: tab.clone(),
            service,
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn submit(&self, customer: &CustomerDetails) -> Result<CheckoutReceipt, CheckoutError> {
        self.submit_at(customer, Utc::now())
    }

    /// Place the persisted cart as an order for `customer`.
    ///
    /// The cart is read from storage, not from any view, so the order holds
    /// what every tab last agreed on. A line the backend refuses to attach is
    /// logged and skipped; a failed create or confirm aborts and leaves the
    /// cart untouched.
    pub fn submit_at(
        &self,
        customer: &CustomerDetails,
        placed_at: DateTime<Utc>,
    ) -> Result<CheckoutReceipt, CheckoutError> {
        let cart = self.tab.cart_store().load();
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let created = self.service.create_order(customer)?;
        for line in &cart {
            if let Err(err) = self.service.attach_line(created.id, &line.id, line.quantity) {
                warn!(order = created.id, product = %line.id, error = %err, "line not attached to order");
            }
        }
        let remote = self.service.confirm(created.id)?;

        let order = OrderRecord::from_cart(cart, placed_at);
        self.tab.history().append(order.clone());
        let marker = self.tab.clear_cart();

        info!(
            order = order.id,
            remote_order = remote.id,
            total = order.total,
            "checkout completed"
        );
        Ok(CheckoutReceipt {
            order,
            remote,
            marker,
        })
    }
}
