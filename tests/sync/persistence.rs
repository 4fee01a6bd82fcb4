use cart_sync::{CartBinding, InMemoryStorage, JsonFileStorage, KeyValueStorage, Origin, StorefrontConfig};

use crate::support::{tv, tv_id};

#[test]
fn cart_survives_reopening_the_origin() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("origin.json");

    {
        let origin = Origin::new(JsonFileStorage::new(&path), StorefrontConfig::default());
        let tab = origin.open_tab();
        let detail = CartBinding::mount(&tab, "detail").unwrap();
        detail.add_item(tv());
        detail.add_item(tv());
        origin.settle();
    }

    let origin = Origin::new(JsonFileStorage::new(&path), StorefrontConfig::default());
    let drawer = CartBinding::mount(&origin.open_tab(), "drawer").unwrap();
    assert_eq!(drawer.snapshot().get(&tv_id()).unwrap().quantity, 2);
}

#[test]
fn corrupt_slot_reads_as_empty_cart() {
    let storage = InMemoryStorage::new();
    storage.set_item("carrito_compras", "[{broken").unwrap();
    let origin = Origin::new(storage, StorefrontConfig::default());
    let drawer = CartBinding::mount(&origin.open_tab(), "drawer").unwrap();

    assert!(drawer.snapshot().is_empty());
    drawer.add_item(tv());
    assert_eq!(origin.open_tab().cart_store().load().len(), 1);
}

#[test]
fn configured_cart_key_is_used() {
    let storage = InMemoryStorage::new();
    let origin = Origin::new(
        storage.clone(),
        StorefrontConfig::default().with_cart_key("cart"),
    );
    let detail = CartBinding::mount(&origin.open_tab(), "detail").unwrap();
    detail.add_item(tv());

    assert!(storage.get_item("cart").unwrap().is_some());
    assert!(storage.get_item("carrito_compras").unwrap().is_none());
}
