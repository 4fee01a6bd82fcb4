use cart_sync::{BindingPhase, Cart, CartBinding, LineItem, Origin};

use crate::support::{radio, radio_id, tv, tv_id};

#[test]
fn every_surface_follows_the_detail_page() {
    let origin = Origin::in_memory();
    let tab = origin.open_tab();
    let detail = CartBinding::mount(&tab, "detail").unwrap();
    let drawer = CartBinding::mount(&tab, "drawer").unwrap();
    let badge = CartBinding::mount(&tab, "badge").unwrap();

    detail.add_item(tv());
    detail.add_item(radio());
    detail.add_item(tv());

    for view in [&drawer, &badge] {
        assert_eq!(view.snapshot(), detail.snapshot());
        assert_eq!(view.reload_count(), 3);
    }
    assert_eq!(badge.summary().units, 3);
    assert_eq!(badge.summary().total, 1040.0);
    assert_eq!(detail.reload_count(), 0);
    assert_eq!(detail.suppressed_count(), 3);
}

#[test]
fn drawer_edits_reach_the_detail_page() {
    let origin = Origin::in_memory();
    let tab = origin.open_tab();
    let detail = CartBinding::mount(&tab, "detail").unwrap();
    let drawer = CartBinding::mount(&tab, "drawer").unwrap();

    detail.add_item(tv());
    drawer.change_quantity(&tv_id(), 4);
    assert_eq!(detail.snapshot().get(&tv_id()).unwrap().quantity, 5);

    drawer.change_quantity(&tv_id(), -100);
    assert_eq!(detail.snapshot().get(&tv_id()).unwrap().quantity, 1);

    drawer.remove_item(&tv_id());
    assert!(detail.snapshot().is_empty());
}

#[test]
fn tv_scenario_through_a_binding() {
    let origin = Origin::in_memory();
    let tab = origin.open_tab();
    tab.cart_store()
        .save(&Cart::from_items(vec![LineItem::new(1, "TV", 500.0)]));
    let drawer = CartBinding::mount(&tab, "drawer").unwrap();

    let cart = drawer.add_item(LineItem::new(1, "TV", 500.0));
    assert_eq!(cart.items()[0].quantity, 2);

    let cart = drawer.change_quantity(&tv_id(), -5);
    assert_eq!(cart.items()[0].quantity, 1);

    let cart = drawer.remove_item(&tv_id());
    assert!(cart.is_empty());
    assert!(tab.cart_store().load().is_empty());
}

#[test]
fn view_updates_before_any_notice_is_handled() {
    let origin = Origin::in_memory();
    let tab = origin.open_tab();
    let drawer = CartBinding::mount(&tab, "drawer").unwrap();

    let returned = drawer.add_item(radio());
    assert_eq!(drawer.snapshot(), returned);
    assert!(drawer.snapshot().contains(&radio_id()));
}

#[test]
fn torn_down_view_stops_following() {
    let origin = Origin::in_memory();
    let tab = origin.open_tab();
    let detail = CartBinding::mount(&tab, "detail").unwrap();
    let drawer = CartBinding::mount(&tab, "drawer").unwrap();

    detail.add_item(tv());
    let stale = drawer.snapshot();
    let badge = CartBinding::mount(&tab, "badge").unwrap();
    badge.teardown();

    detail.add_item(radio());
    assert_ne!(drawer.snapshot(), stale);
    assert_eq!(tab.local().subscriber_count(), 2);
}

#[test]
fn dropping_a_view_unsubscribes_it() {
    let origin = Origin::in_memory();
    let tab = origin.open_tab();
    {
        let drawer = CartBinding::mount(&tab, "drawer").unwrap();
        assert_eq!(drawer.phase(), BindingPhase::Loaded);
        assert_eq!(tab.local().subscriber_count(), 1);
    }
    assert_eq!(tab.local().subscriber_count(), 0);
}
