//! Two tabs writing from the same stale snapshot: last writer wins.
//!
//! Nothing guards the read-modify-write across tabs. These tests pin the
//! behavior down so it stays a known limitation instead of a surprise.

use cart_sync::{cart, Origin};

use crate::support::{radio, radio_id, tv, tv_id};

#[test]
fn concurrent_writers_lose_the_earlier_update() {
    let origin = Origin::in_memory();
    let tab_a = origin.open_tab();
    let tab_b = origin.open_tab();
    let store_a = tab_a.cart_store();
    let store_b = tab_b.cart_store();

    let seen_by_a = store_a.load();
    let seen_by_b = store_b.load();

    store_a.save(&cart::add_or_increment(&seen_by_a, tv()));
    store_b.save(&cart::add_or_increment(&seen_by_b, radio()));

    let persisted = store_a.load();
    assert!(persisted.contains(&radio_id()));
    assert!(!persisted.contains(&tv_id()));
}

#[test]
fn stale_binding_overwrites_newer_write() {
    use cart_sync::CartBinding;

    let origin = Origin::in_memory();
    let tab_a = origin.open_tab();
    let tab_b = origin.open_tab();
    let view_a = CartBinding::mount(&tab_a, "drawer").unwrap();
    let view_b = CartBinding::mount(&tab_b, "drawer").unwrap();

    // B may mutate before A's notice reaches it; either way B's write is the last one.
    view_a.add_item(tv());
    view_b.add_item(radio());
    origin.settle();

    let persisted = tab_a.cart_store().load();
    assert!(persisted.contains(&radio_id()));
    assert_eq!(view_a.snapshot(), persisted);
}
