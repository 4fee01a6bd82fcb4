//! Pure cart transitions.
//!
//! Every function takes the current cart by reference and returns the next
//! one. Nothing here touches storage or the notification bus, so any UI
//! surface can compute a transition and decide separately how to persist it.

use super::cart::Cart;
use super::item::{ItemId, LineItem};

/// Add one unit of `item`.
///
/// If a line with the same id exists, its quantity goes up by one and the
/// stored line keeps its own name, price and display fields. Otherwise `item`
/// is appended with quantity 1, whatever quantity it came with.
pub fn add_or_increment(cart: &Cart, item: LineItem) -> Cart {
    let mut next = cart.clone();
    match next.items_mut().iter_mut().find(|line| line.id == item.id) {
        Some(line) => line.quantity = line.quantity.saturating_add(1),
        None => next.items_mut().push(LineItem { quantity: 1, ..item }),
    }
    next
}

/// Shift the quantity of line `id` by `delta`, never below 1.
///
/// Unknown ids leave the cart as it was.
pub fn set_quantity_delta(cart: &Cart, id: &ItemId, delta: i64) -> Cart {
    let mut next = cart.clone();
    if let Some(line) = next.items_mut().iter_mut().find(|line| &line.id == id) {
        let shifted = i64::from(line.quantity).saturating_add(delta).max(1);
        line.quantity = u32::try_from(shifted).unwrap_or(u32::MAX);
    }
    next
}

/// Drop line `id`. Unknown ids leave the cart as it was.
pub fn remove(cart: &Cart, id: &ItemId) -> Cart {
    cart.items()
        .iter()
        .filter(|line| &line.id != id)
        .cloned()
        .collect()
}

pub fn clear() -> Cart {
    Cart::new()
}
