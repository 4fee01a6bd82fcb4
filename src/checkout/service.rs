use serde::{Deserialize, Deserializer, Serialize};

use crate::cart::ItemId;

use super::error::OrderServiceError;

/// Shipping and contact data sent when an order is created.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerDetails {
    #[serde(rename = "nombreCliente", deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(rename = "telefonoCliente", deserialize_with = "null_as_empty")]
    pub phone: String,
    #[serde(rename = "emailCliente", deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(rename = "direccionEnvio", deserialize_with = "null_as_empty")]
    pub shipping_address: String,
}

/// The backend reports contact fields the shopper left blank as `null`.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "PENDIENTE")]
    #[default]
    Pending,
    #[serde(rename = "ENVIADO")]
    Shipped,
    #[serde(rename = "ENTREGADO")]
    Delivered,
    #[serde(other)]
    Other,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductRef {
    pub id: Option<ItemId>,
    #[serde(rename = "nombre")]
    pub name: String,
}

/// One product line attached to a remote order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderLine {
    pub id: Option<i64>,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
    #[serde(rename = "precioUnitario")]
    pub unit_price: f64,
    #[serde(rename = "producto")]
    pub product: Option<ProductRef>,
}

/// An order as the backend reports it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteOrder {
    pub id: i64,
    #[serde(flatten)]
    pub customer: CustomerDetails,
    #[serde(rename = "estado", default)]
    pub status: Option<OrderStatus>,
    #[serde(rename = "fechaPedido", default)]
    pub placed_at: Option<String>,
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(rename = "detalles", default)]
    pub lines: Vec<OrderLine>,
}

/// The order backend, as checkout and the order-history view need it.
///
/// Mirrors the backend's three-step protocol: create an empty order for a
/// customer, attach each cart line, then confirm.
pub trait OrderService: Send + Sync {
    fn create_order(&self, customer: &CustomerDetails) -> Result<RemoteOrder, OrderServiceError>;

    fn attach_line(
        &self,
        order_id: i64,
        product_id: &ItemId,
        quantity: u32,
    ) -> Result<(), OrderServiceError>;

    fn confirm(&self, order_id: i64) -> Result<RemoteOrder, OrderServiceError>;

    /// Orders placed with `email`, newest first.
    fn orders_for(&self, email: &str) -> Result<Vec<RemoteOrder>, OrderServiceError>;
}

impl<T: OrderService + ?Sized> OrderService for std::sync::Arc<T> {
    fn create_order(&self, customer: &CustomerDetails) -> Result<RemoteOrder, OrderServiceError> {
        (**self).create_order(customer)
    }

    fn attach_line(
        &self,
        order_id: i64,
        product_id: &ItemId,
        quantity: u32,
    ) -> Result<(), OrderServiceError> {
        (**self).attach_line(order_id, product_id, quantity)
    }

    fn confirm(&self, order_id: i64) -> Result<RemoteOrder, OrderServiceError> {
        (**self).confirm(order_id)
    }

    fn orders_for(&self, email: &str) -> Result<Vec<RemoteOrder>, OrderServiceError> {
        (**self).orders_for(email)
    }
}
