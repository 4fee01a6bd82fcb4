//! `HttpOrderService` against a mock order backend.
//!
//! The backend is an axum app on its own tokio runtime thread; the blocking
//! client runs on the test thread.

mod backend;

use cart_sync::{
    Checkout, CheckoutError, CustomerDetails, HttpOrderService, ItemId, LineItem, OrderService,
    OrderServiceError, Origin, StorefrontConfig,
};

use backend::start_backend;

fn ana() -> CustomerDetails {
    CustomerDetails {
        name: "Ana".into(),
        phone: "600000000".into(),
        email: "ana@example.com".into(),
        shipping_address: "Calle Mayor 1".into(),
    }
}

fn service_for(base: &str) -> HttpOrderService {
    HttpOrderService::new(&StorefrontConfig::default().with_api_base(base)).unwrap()
}

#[test]
fn checkout_over_http() {
    let (base, backend) = start_backend();
    let origin = Origin::in_memory();
    let tab = origin.open_tab();
    tab.write_cart(
        &[
            LineItem::new(1, "TV", 500.0).with_quantity(2),
            LineItem::new("sku-2", "Radio", 40.0),
        ]
        .into_iter()
        .collect(),
    );

    let receipt = Checkout::new(&tab, service_for(&base)).submit(&ana()).unwrap();

    assert_eq!(receipt.remote.id, 1);
    assert_eq!(receipt.remote.customer.email, "ana@example.com");
    assert_eq!(receipt.remote.lines.len(), 2);
    assert_eq!(receipt.order.total, 1040.0);
    assert!(tab.cart_store().load().is_empty());

    let attached = backend.attached(1);
    assert_eq!(
        attached,
        vec![("1".to_string(), 2), ("sku-2".to_string(), 1)]
    );
    assert!(backend.is_confirmed(1));
}

#[test]
fn blank_contact_fields_come_back_null() {
    let (base, backend) = start_backend();
    let origin = Origin::in_memory();
    let tab = origin.open_tab();
    tab.write_cart(&[LineItem::new(1, "TV", 500.0)].into_iter().collect());
    let walk_in = CustomerDetails {
        phone: String::new(),
        shipping_address: String::new(),
        ..ana()
    };

    let receipt = Checkout::new(&tab, service_for(&base))
        .submit(&walk_in)
        .unwrap();

    assert_eq!(receipt.remote.customer.phone, "");
    assert_eq!(receipt.remote.customer.shipping_address, "");
    assert!(backend.is_confirmed(1));
    assert!(tab.cart_store().load().is_empty());
}

#[test]
fn confirm_failure_keeps_cart() {
    let (base, backend) = start_backend();
    backend.fail_confirm();
    let origin = Origin::in_memory();
    let tab = origin.open_tab();
    tab.write_cart(&[LineItem::new(1, "TV", 500.0)].into_iter().collect());

    let err = Checkout::new(&tab, service_for(&base))
        .submit(&ana())
        .unwrap_err();

    assert_eq!(
        err,
        CheckoutError::Service(OrderServiceError::Status {
            operation: "confirm order",
            status: 500,
        })
    );
    assert_eq!(tab.cart_store().load().len(), 1);
    assert!(tab.history().load().is_empty());
}

#[test]
fn orders_for_customer_newest_first() {
    let (base, _backend) = start_backend();
    let service = service_for(&base);
    for _ in 0..3 {
        let order = service.create_order(&ana()).unwrap();
        service.attach_line(order.id, &ItemId::from(1), 1).unwrap();
        service.confirm(order.id).unwrap();
    }

    let orders = service.orders_for("ana@example.com").unwrap();
    let ids: Vec<i64> = orders.iter().map(|order| order.id).collect();
    assert_eq!(ids, vec![3, 2, 1]);
    assert!(service.orders_for("nadie@example.com").unwrap().is_empty());
}

#[test]
fn unknown_order_is_a_status_error() {
    let (base, _backend) = start_backend();
    let err = service_for(&base).confirm(99).unwrap_err();
    assert_eq!(
        err,
        OrderServiceError::Status {
            operation: "confirm order",
            status: 404,
        }
    );
}

#[test]
fn unreachable_backend_is_a_transport_error() {
    let err = service_for("http://127.0.0.1:9").create_order(&ana()).unwrap_err();
    assert!(matches!(err, OrderServiceError::Transport(_)));
}
