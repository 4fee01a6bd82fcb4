mod cart;
mod item;
mod mutation;

pub use cart::{Cart, CartSummary};
pub use item::{ItemId, LineItem};
pub use mutation::{add_or_increment, clear, remove, set_quantity_delta};
