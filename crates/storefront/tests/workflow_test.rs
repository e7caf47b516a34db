//! Order Workflow against mocked stores.
//!
//! Requests are answered in the order they reach the mock. `join_all` sends every cart
//! line's create before any line reads its order back, which the bulk tests rely on.

use chrono::{Duration, TimeZone, Utc};
use resource_actor::mock::MockClient;
use resource_actor::FrameworkError;
use std::sync::Arc;
use storefront::auth::{AuthGateway, BcryptHasher, ClaimSigner, JwtSigner, Principal, SessionPolicy};
use storefront::clients::{AdminClient, CustomerClient, OrderClient};
use storefront::error::{ServiceError, StoreError};
use storefront::model::{Administrator, Customer, CustomerId, Order, OrderId, OrderStatus};
use storefront::orders::{BulkOrderForm, CartLine, OrderForm, OrderWorkflow};

const SECRET: &str = "workflow-test-secret";

struct Harness {
    orders: MockClient<Order>,
    _admins: MockClient<Administrator>,
    _customers: MockClient<Customer>,
    workflow: OrderWorkflow,
}

fn harness() -> Harness {
    let orders = MockClient::<Order>::new();
    let admins = MockClient::<Administrator>::new();
    let customers = MockClient::<Customer>::new();
    let auth = AuthGateway::new(
        AdminClient::new(admins.client()),
        CustomerClient::new(customers.client()),
        Arc::new(BcryptHasher::new(4)),
        Arc::new(JwtSigner::new(SECRET)),
        SessionPolicy::default(),
    );
    let workflow = OrderWorkflow::new(OrderClient::new(orders.client()), auth);
    Harness {
        orders,
        _admins: admins,
        _customers: customers,
        workflow,
    }
}

fn token_for(principal: Principal) -> String {
    JwtSigner::new(SECRET)
        .sign(principal, Duration::hours(1))
        .unwrap()
        .as_str()
        .to_string()
}

fn order(id: u32, product: &str, minutes: i64) -> Order {
    Order {
        id: OrderId::from(id),
        name: "A".into(),
        mobile: "123".into(),
        address: "X".into(),
        area_name: "Kidwai Nagar".into(),
        product_name: product.into(),
        quantity: 1,
        customer_id: Some(CustomerId::from(7)),
        status: OrderStatus::Pending,
        created_at: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap() + Duration::minutes(minutes),
    }
}

fn cart(products: &[&str]) -> BulkOrderForm {
    BulkOrderForm {
        name: "A".into(),
        mobile: "123".into(),
        address: "X".into(),
        area_name: "Kidwai Nagar".into(),
        items: products
            .iter()
            .map(|p| CartLine {
                product_name: p.to_string(),
                quantity: 1,
                price: 700.0,
            })
            .collect(),
    }
}

#[tokio::test]
async fn test_place_order_reads_back_the_stored_record() {
    let mut h = harness();
    h.orders.expect_create().return_ok(OrderId::from(1));
    h.orders.expect_get(OrderId::from(1)).return_ok(Some(order(1, "Almond", 0)));

    let placed = h
        .workflow
        .place_order(
            Some(token_for(Principal::Customer(CustomerId::from(7))).as_str()),
            OrderForm {
                name: "A".into(),
                mobile: "123".into(),
                address: "X".into(),
                area_name: "Kidwai Nagar".into(),
                product_name: "Almond".into(),
                quantity: 1,
            },
        )
        .await
        .unwrap();

    assert_eq!(placed.id, OrderId::from(1));
    h.orders.verify();
}

#[tokio::test]
async fn test_bulk_order_reports_partial_failure() {
    let mut h = harness();
    h.orders.expect_create().return_ok(OrderId::from(1));
    h.orders.expect_create().return_err(FrameworkError::ActorClosed);
    h.orders.expect_get(OrderId::from(1)).return_ok(Some(order(1, "Almond", 0)));

    let receipt = h
        .workflow
        .place_bulk_order(None, cart(&["Almond", "Cashew"]))
        .await
        .unwrap();

    assert!(!receipt.is_complete());
    assert!(!receipt.is_total_failure());
    assert_eq!(receipt.orders.len(), 1);
    assert_eq!(receipt.failures.len(), 1);
    assert_eq!(receipt.failures[0].index, 1);
    assert_eq!(receipt.failures[0].product, "Cashew");
    h.orders.verify();
}

#[tokio::test]
async fn test_bulk_order_total_failure() {
    let mut h = harness();
    h.orders.expect_create().return_err(FrameworkError::ActorClosed);
    h.orders.expect_create().return_err(FrameworkError::ActorClosed);

    let receipt = h
        .workflow
        .place_bulk_order(None, cart(&["Almond", "Cashew"]))
        .await
        .unwrap();

    assert!(receipt.is_total_failure());
    assert_eq!(receipt.failures.len(), 2);
    h.orders.verify();
}

#[tokio::test]
async fn test_own_orders_come_back_newest_first() {
    let mut h = harness();
    h.orders
        .expect_list()
        .return_ok(vec![order(1, "Almond", 0), order(2, "Cashew", 30), order(3, "Almond", 10)]);

    let orders = h
        .workflow
        .list_own_orders(Some(token_for(Principal::Customer(CustomerId::from(7))).as_str()))
        .await
        .unwrap();

    let ids: Vec<_> = orders.iter().map(|o| o.id).collect();
    assert_eq!(ids, [OrderId::from(2), OrderId::from(3), OrderId::from(1)]);
    h.orders.verify();
}

#[tokio::test]
async fn test_status_change_surfaces_store_failure() {
    let mut h = harness();
    let admin = token_for(Principal::Administrator(storefront::model::AdminId::from(1)));
    h.orders
        .expect_action(OrderId::from(5))
        .return_err(FrameworkError::ActorClosed);

    let result = h.workflow.set_order_status(Some(admin.as_str()), OrderId::from(5), "Delivered").await;
    assert!(matches!(result, Err(ServiceError::Store(StoreError::Unavailable(_)))));
    h.orders.verify();
}

#[tokio::test]
async fn test_bad_status_never_reaches_the_store() {
    let h = harness();
    let admin = token_for(Principal::Administrator(storefront::model::AdminId::from(1)));

    let result = h.workflow.set_order_status(Some(admin.as_str()), OrderId::from(5), "Lost").await;
    assert!(matches!(result, Err(ServiceError::Validation(_))));
    h.orders.verify();
}
