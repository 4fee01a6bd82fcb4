//! Checkout: hand the cart to the order backend, then clear it.
//!
//! The backend is reached through [`OrderService`]. The cart is only cleared
//! after the backend confirmed the order; any failure before that leaves the
//! cart exactly as it was so the shopper can retry.

mod checkout;
mod error;
#[cfg(feature = "http")]
mod http;
mod in_memory;
mod service;

pub use checkout::{Checkout, CheckoutReceipt};
pub use error::{CheckoutError, OrderServiceError};
#[cfg(feature = "http")]
pub use http::HttpOrderService;
pub use in_memory::{FailPoint, InMemoryOrderService};
pub use service::{CustomerDetails, OrderLine, OrderService, OrderStatus, ProductRef, RemoteOrder};
