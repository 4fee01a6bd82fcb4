use thiserror::Error;

/// Failure talking to the order backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderServiceError {
    #[error("order backend unreachable: {0}")]
    Transport(String),

    #[error("order backend answered {status} to {operation}")]
    Status { operation: &'static str, status: u16 },

    #[error("order backend response unreadable: {0}")]
    Decode(String),

    #[error("order rejected: {0}")]
    Rejected(String),
}

/// What the checkout page shows when a purchase does not go through.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("the cart is empty")]
    EmptyCart,

    #[error("order could not be placed: {0}")]
    Service(#[from] OrderServiceError),
}
