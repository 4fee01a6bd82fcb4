mod cart_store;
mod history;

pub use cart_store::CartStore;
pub use history::{OrderHistory, OrderRecord};
