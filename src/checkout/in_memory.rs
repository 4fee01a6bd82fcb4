use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::cart::ItemId;

use super::error::OrderServiceError;
use super::service::{CustomerDetails, OrderLine, OrderService, OrderStatus, ProductRef, RemoteOrder};

/// Step at which [`InMemoryOrderService`] should fail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FailPoint {
    Create,
    /// Attaching this product fails; other lines go through.
    Attach(ItemId),
    Confirm,
}

#[derive(Default)]
struct Backend {
    next_id: i64,
    orders: BTreeMap<i64, RemoteOrder>,
    confirmed: Vec<i64>,
    fail_points: Vec<FailPoint>,
}

/// Order backend kept in memory, for tests and single-process setups.
///
/// Clones share the same backend, so a test can keep one handle and give the
/// other to [`Checkout`](super::Checkout).
#[derive(Clone, Default)]
pub struct InMemoryOrderService {
    backend: Arc<Mutex<Backend>>,
}

impl InMemoryOrderService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the given step fail until [`heal`](Self::heal) is called.
    pub fn fail_at(self, point: FailPoint) -> Self {
        if let Ok(mut backend) = self.backend.lock() {
            backend.fail_points.push(point);
        }
        self
    }

    pub fn heal(&self) {
        if let Ok(mut backend) = self.backend.lock() {
            backend.fail_points.clear();
        }
    }

    pub fn orders(&self) -> Vec<RemoteOrder> {
        self.backend
            .lock()
            .map(|backend| backend.orders.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Ids of confirmed orders, in confirmation order.
    pub fn confirmed(&self) -> Vec<i64> {
        self.backend
            .lock()
            .map(|backend| backend.confirmed.clone())
            .unwrap_or_default()
    }

    fn with_backend<T>(
        &self,
        f: impl FnOnce(&mut Backend) -> Result<T, OrderServiceError>,
    ) -> Result<T, OrderServiceError> {
        let mut backend = self
            .backend
            .lock()
            .map_err(|_| OrderServiceError::Transport("in-memory backend poisoned".into()))?;
        f(&mut backend)
    }
}

impl Backend {
    fn fails_at(&self, point: &FailPoint) -> bool {
        self.fail_points.contains(point)
    }

    fn order_mut(&mut self, order_id: i64) -> Result<&mut RemoteOrder, OrderServiceError> {
        self.orders
            .get_mut(&order_id)
            .ok_or_else(|| OrderServiceError::Rejected(format!("order {} does not exist", order_id)))
    }
}

impl OrderService for InMemoryOrderService {
    fn create_order(&self, customer: &CustomerDetails) -> Result<RemoteOrder, OrderServiceError> {
        self.with_backend(|backend| {
            if backend.fails_at(&FailPoint::Create) {
                return Err(OrderServiceError::Status {
                    operation: "create order",
                    status: 503,
                });
            }
            backend.next_id += 1;
            let order = RemoteOrder {
                id: backend.next_id,
                customer: customer.clone(),
                status: Some(OrderStatus::Pending),
                total: Some(0.0),
                ..RemoteOrder::default()
            };
            backend.orders.insert(order.id, order.clone());
            Ok(order)
        })
    }

    fn attach_line(
        &self,
        order_id: i64,
        product_id: &ItemId,
        quantity: u32,
    ) -> Result<(), OrderServiceError> {
        self.with_backend(|backend| {
            if backend.fails_at(&FailPoint::Attach(product_id.clone())) {
                return Err(OrderServiceError::Status {
                    operation: "attach line",
                    status: 404,
                });
            }
            let order = backend.order_mut(order_id)?;
            order.lines.push(OrderLine {
                id: Some(order.lines.len() as i64 + 1),
                quantity,
                unit_price: 0.0,
                product: Some(ProductRef {
                    id: Some(product_id.clone()),
                    name: String::new(),
                }),
            });
            Ok(())
        })
    }

    fn confirm(&self, order_id: i64) -> Result<RemoteOrder, OrderServiceError> {
        self.with_backend(|backend| {
            if backend.fails_at(&FailPoint::Confirm) {
                return Err(OrderServiceError::Status {
                    operation: "confirm order",
                    status: 500,
                });
            }
            let order = backend.order_mut(order_id)?;
            if order.lines.is_empty() {
                return Err(OrderServiceError::Rejected(format!(
                    "order {} has no lines",
                    order_id
                )));
            }
            let confirmed = order.clone();
            backend.confirmed.push(order_id);
            Ok(confirmed)
        })
    }

    fn orders_for(&self, email: &str) -> Result<Vec<RemoteOrder>, OrderServiceError> {
        self.with_backend(|backend| {
            Ok(backend
                .orders
                .values()
                .rev()
                .filter(|order| order.customer.email == email)
                .cloned()
                .collect())
        })
    }
}
