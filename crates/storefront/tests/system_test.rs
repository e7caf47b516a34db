//! End-to-end behaviour with every actor running.

use std::time::Duration;
use storefront::auth::{PrincipalKind, ProfileUpdate, Registration};
use storefront::config::Config;
use storefront::error::{AuthError, NotFoundError, ServiceError, ValidationError};
use storefront::lifecycle::StorefrontSystem;
use storefront::model::{AreaCreate, OrderId, OrderStatus, ProductCreate, ProductId, SchemeCreate};
use storefront::orders::{BulkOrderForm, CartLine, OrderForm};
use storefront::session::{watch_own_orders, ClientSession, Contact};
use resource_actor::ActorClient;

const BASE_URL: &str = "http://localhost:5000";
const ADMIN_PASSWORD: &str = "password";

fn start() -> StorefrontSystem {
    let config = Config {
        bcrypt_cost: 4,
        ..Config::default()
    };
    StorefrontSystem::start(&config)
}

async fn seeded() -> StorefrontSystem {
    let system = start();
    assert!(system.seed(BASE_URL, ADMIN_PASSWORD).await);
    system
}

async fn admin_token(system: &StorefrontSystem) -> String {
    system
        .auth
        .issue_admin_session("admin", ADMIN_PASSWORD)
        .await
        .unwrap()
        .as_str()
        .to_string()
}

fn registration(email: &str) -> Registration {
    Registration {
        username: "Asha".to_string(),
        email: email.to_string(),
        password: "hunter22".to_string(),
        mobile: "9999999999".to_string(),
        address: "12 Mall Road".to_string(),
        area: Some("Kidwai Nagar".to_string()),
    }
}

fn bulk_form(items: Vec<CartLine>) -> BulkOrderForm {
    BulkOrderForm {
        name: "A".to_string(),
        mobile: "123".to_string(),
        address: "X".to_string(),
        area_name: "Kidwai Nagar".to_string(),
        items,
    }
}

fn line(product: &str, quantity: u32, price: f64) -> CartLine {
    CartLine {
        product_name: product.to_string(),
        quantity,
        price,
    }
}

#[tokio::test]
async fn test_seed_runs_once() {
    let system = seeded().await;
    assert!(!system.seed(BASE_URL, ADMIN_PASSWORD).await);

    let areas = system.resolver.list_areas().await.unwrap();
    let names: Vec<_> = areas.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["Kidwai Nagar", "Saket Nagar", "Hanspuram"]);
    assert_eq!(system.schemes.count().await.unwrap(), 6);

    let products = system.resolver.list_products().await.unwrap();
    assert_eq!(products[0].image, "http://localhost:5000/uploads/almond.png");

    let kidwai = system.resolver.list_schemes_for_area("Kidwai Nagar").await.unwrap();
    let prices: Vec<_> = kidwai
        .iter()
        .map(|s| (s.product.as_ref().unwrap().name.as_str(), s.price, s.offer.as_str()))
        .collect();
    assert_eq!(prices, [("Almond", 700.0, "Best Seller"), ("Cashew", 800.0, "Fresh Stock")]);
}

#[tokio::test]
async fn test_admin_session_speaks_only_for_administrators() {
    let system = seeded().await;
    let token = admin_token(&system).await;
    let admin = system.admins.find_by_username("admin").await.unwrap().unwrap();

    assert_eq!(system.auth.require_admin(Some(token.as_str())), Ok(admin.id));
    assert_eq!(
        system.auth.verify(Some(token.as_str()), PrincipalKind::Customer),
        Err(AuthError::InvalidToken)
    );

    for (username, password) in [("admin", "wrong"), ("nobody", ADMIN_PASSWORD)] {
        assert_eq!(
            system.auth.issue_admin_session(username, password).await,
            Err(AuthError::InvalidCredentials.into())
        );
    }
}

#[tokio::test]
async fn test_admin_operations_need_an_admin_claim() {
    let system = seeded().await;
    let customer = system
        .auth
        .register_customer(registration("asha@example.com"))
        .await
        .unwrap();
    let area = AreaCreate {
        name: "Civil Lines".to_string(),
    };

    assert_eq!(
        system.resolver.create_area(None, area.clone()).await,
        Err(AuthError::MissingToken.into())
    );
    assert_eq!(
        system.resolver.create_area(Some(customer.token.as_str()), area.clone()).await,
        Err(AuthError::InvalidToken.into())
    );
    assert_eq!(
        system.resolver.create_area(Some("not-a-token"), area).await,
        Err(AuthError::InvalidToken.into())
    );
    assert_eq!(system.areas.count().await.unwrap(), 3);
}

#[tokio::test]
async fn test_create_administrator() {
    let system = seeded().await;
    let token = admin_token(&system).await;

    system
        .auth
        .create_administrator(Some(token.as_str()), "ravi", "s3cret")
        .await
        .unwrap();
    assert!(system.auth.issue_admin_session("ravi", "s3cret").await.is_ok());

    assert_eq!(
        system.auth.create_administrator(Some(token.as_str()), "ravi", "other").await,
        Err(AuthError::AlreadyExists("Administrator".into()).into())
    );
}

#[tokio::test]
async fn test_deleting_an_area_purges_its_schemes() {
    let system = seeded().await;
    let token = admin_token(&system).await;
    let area = system.resolver.resolve_area("Kidwai Nagar").await.unwrap();
    assert_eq!(system.resolver.list_schemes_for_area("Kidwai Nagar").await.unwrap().len(), 2);

    system.resolver.delete_area(Some(token.as_str()), area.id).await.unwrap();

    assert_eq!(
        system.resolver.list_schemes_for_area("Kidwai Nagar").await,
        Err(NotFoundError::Area("Kidwai Nagar".into()).into())
    );
    let remaining = system.schemes.list().await.unwrap();
    assert_eq!(remaining.len(), 4);
    assert!(remaining.iter().all(|s| s.area != area.id));

    // Deleting it again is not an error.
    system.resolver.delete_area(Some(token.as_str()), area.id).await.unwrap();
}

#[tokio::test]
async fn test_deleted_product_shows_as_unavailable() {
    let system = seeded().await;
    let token = admin_token(&system).await;
    let almond = system.resolver.list_products().await.unwrap()[0].clone();

    system.resolver.delete_product(Some(token.as_str()), almond.id).await.unwrap();
    assert_eq!(
        system.resolver.delete_product(Some(token.as_str()), almond.id).await,
        Err(NotFoundError::Product(almond.id.to_string()).into())
    );

    let schemes = system.resolver.list_schemes_for_area("Saket Nagar").await.unwrap();
    assert_eq!(schemes.len(), 2);
    assert!(schemes[0].product.is_none());

    let all = system.resolver.list_all_schemes(Some(token.as_str())).await.unwrap();
    assert_eq!(all.iter().filter(|s| s.product.is_none()).count(), 3);
    assert!(all.iter().all(|s| s.area.is_some()));
}

#[tokio::test]
async fn test_create_scheme_checks_references() {
    let system = seeded().await;
    let token = admin_token(&system).await;
    let area = system.resolver.resolve_area("Hanspuram").await.unwrap();

    let missing = ProductId::from(99);
    let result = system
        .resolver
        .create_scheme(
            Some(token.as_str()),
            SchemeCreate {
                area: area.id,
                product: missing,
                price: 500.0,
                offer: String::new(),
            },
        )
        .await;
    assert_eq!(result, Err(NotFoundError::Product(missing.to_string()).into()));

    let pista = system
        .resolver
        .create_product(
            Some(token.as_str()),
            ProductCreate {
                name: "Pista".to_string(),
                image: String::new(),
            },
        )
        .await
        .unwrap();
    let scheme = system
        .resolver
        .create_scheme(
            Some(token.as_str()),
            SchemeCreate {
                area: area.id,
                product: pista.id,
                price: 950.0,
                offer: "  New  ".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(scheme.offer, "New");
    assert_eq!(system.resolver.list_schemes_for_area(&area.id.to_string()).await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_area_name_wins_over_id() {
    let system = start();
    let token = admin_token_after_bootstrap(&system).await;

    let first = system
        .resolver
        .create_area(Some(token.as_str()), AreaCreate { name: "North".into() })
        .await
        .unwrap();
    let impostor = system
        .resolver
        .create_area(Some(token.as_str()), AreaCreate { name: first.id.to_string() })
        .await
        .unwrap();

    let resolved = system.resolver.resolve_area(&first.id.to_string()).await.unwrap();
    assert_eq!(resolved.id, impostor.id);

    let by_id = system.resolver.resolve_area(&impostor.id.to_string()).await.unwrap();
    assert_eq!(by_id.id, impostor.id);

    assert!(matches!(
        system.resolver.resolve_area("Nowhere").await,
        Err(ServiceError::NotFound(NotFoundError::Area(_)))
    ));
}

async fn admin_token_after_bootstrap(system: &StorefrontSystem) -> String {
    // Seeding also creates the admin; wipe the seeded areas so the test starts clean.
    assert!(system.seed(BASE_URL, ADMIN_PASSWORD).await);
    let token = admin_token(system).await;
    for area in system.resolver.list_areas().await.unwrap() {
        system.resolver.delete_area(Some(token.as_str()), area.id).await.unwrap();
    }
    token
}

#[tokio::test]
async fn test_list_areas_is_stable() {
    let system = seeded().await;
    let first = system.resolver.list_areas().await.unwrap();
    let second = system.resolver.list_areas().await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_new_orders_are_always_pending() {
    let system = seeded().await;
    let form: OrderForm = serde_json::from_value(serde_json::json!({
        "name": "Guest",
        "mobile": "123",
        "address": "X",
        "area": "Kidwai Nagar",
        "product": "Almond",
        "quantity": 3,
        "status": "Delivered",
        "customerId": "customer_1"
    }))
    .unwrap();

    let order = system.workflow.place_order(None, form).await.unwrap();
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.customer_id, None);

    let stored = system.orders.get(order.id).await.unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::Pending);
}

#[tokio::test]
async fn test_invalid_customer_token_places_a_guest_order() {
    let system = seeded().await;
    let form = OrderForm {
        name: "Guest".into(),
        mobile: "123".into(),
        address: "X".into(),
        area_name: "Saket Nagar".into(),
        product_name: "Cashew".into(),
        quantity: 1,
    };
    let order = system.workflow.place_order(Some("stale"), form).await.unwrap();
    assert_eq!(order.customer_id, None);
}

#[tokio::test]
async fn test_bulk_order_places_every_line() {
    let system = seeded().await;
    let session = system
        .auth
        .register_customer(registration("asha@example.com"))
        .await
        .unwrap();
    let token = session.token.as_str();

    let receipt = system
        .workflow
        .place_bulk_order(
            Some(token),
            bulk_form(vec![line("Almond", 2, 700.0), line("Cashew", 1, 800.0)]),
        )
        .await
        .unwrap();

    assert!(receipt.is_complete());
    assert_eq!(receipt.orders.len(), 2);
    assert_eq!(system.orders.count().await.unwrap(), 2);

    let mut quantities: Vec<_> = receipt
        .orders
        .iter()
        .map(|o| (o.product_name.as_str(), o.quantity))
        .collect();
    quantities.sort();
    assert_eq!(quantities, [("Almond", 2), ("Cashew", 1)]);
    assert!(receipt.orders.iter().all(|o| o.status == OrderStatus::Pending));
    assert!(receipt.orders.iter().all(|o| o.customer_id == Some(session.customer.id)));

    let mine = system.workflow.list_own_orders(Some(token)).await.unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine[0].created_at >= mine[1].created_at);
}

#[tokio::test]
async fn test_bulk_order_with_a_bad_line_writes_nothing() {
    let system = seeded().await;

    let result = system
        .workflow
        .place_bulk_order(None, bulk_form(vec![line("Almond", 2, 700.0), line("Cashew", 0, 800.0)]))
        .await;
    assert!(matches!(result, Err(ServiceError::Validation(_))));

    let result = system
        .workflow
        .place_bulk_order(None, bulk_form(vec![line("Almond", 1, -1.0)]))
        .await;
    assert!(matches!(result, Err(ServiceError::Validation(ValidationError::InvalidField { field: "price", .. }))));

    let result = system.workflow.place_bulk_order(None, bulk_form(Vec::new())).await;
    assert_eq!(result, Err(ValidationError::MissingField("items").into()));

    assert_eq!(system.orders.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_order_status_changes() {
    let system = seeded().await;
    let token = admin_token(&system).await;
    let receipt = system
        .workflow
        .place_bulk_order(None, bulk_form(vec![line("Almond", 1, 700.0)]))
        .await
        .unwrap();
    let id = receipt.orders[0].id;

    let shipped = system.workflow.set_order_status(Some(token.as_str()), id, "Shipped").await.unwrap();
    assert_eq!(shipped.status, OrderStatus::Shipped);

    assert_eq!(
        system.workflow.set_order_status(Some(token.as_str()), id, "Bogus").await,
        Err(ValidationError::InvalidStatus("Bogus".into()).into())
    );
    assert_eq!(system.orders.get(id).await.unwrap().unwrap().status, OrderStatus::Shipped);

    let missing = OrderId::from(42);
    assert!(matches!(
        system.workflow.set_order_status(Some(token.as_str()), missing, "Delivered").await,
        Err(ServiceError::NotFound(NotFoundError::Order(_)))
    ));

    assert_eq!(
        system.workflow.set_order_status(None, id, "Delivered").await,
        Err(AuthError::MissingToken.into())
    );
}

#[tokio::test]
async fn test_duplicate_registration_is_rejected() {
    let system = seeded().await;

    let (first, second) = tokio::join!(
        system.auth.register_customer(registration("asha@example.com")),
        system.auth.register_customer(registration("  ASHA@example.com ")),
    );
    let outcomes = [first, second];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(outcomes
        .iter()
        .any(|r| *r == Err(AuthError::AlreadyExists("Customer".into()).into())));

    let token = admin_token(&system).await;
    assert_eq!(system.auth.customer_count(Some(token.as_str())).await.unwrap(), 1);
}

#[tokio::test]
async fn test_customer_login_and_profile_update() {
    let system = seeded().await;
    system
        .auth
        .register_customer(registration("asha@example.com"))
        .await
        .unwrap();

    let session = system
        .auth
        .issue_customer_session("Asha@Example.com", "hunter22")
        .await
        .unwrap();
    assert_eq!(session.customer.email, "asha@example.com");

    let view = system
        .auth
        .update_profile(
            Some(session.token.as_str()),
            ProfileUpdate {
                username: Some("Asha K".into()),
                password: Some("new-pass".into()),
                ..ProfileUpdate::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(view.username, "Asha K");
    assert_eq!(view.address, "12 Mall Road");

    assert_eq!(
        system.auth.issue_customer_session("asha@example.com", "hunter22").await,
        Err(AuthError::InvalidCredentials.into())
    );
    assert!(system
        .auth
        .issue_customer_session("asha@example.com", "new-pass")
        .await
        .is_ok());
}

#[tokio::test]
async fn test_session_checkout_and_order_polling() {
    let system = seeded().await;
    let registered = system
        .auth
        .register_customer(registration("asha@example.com"))
        .await
        .unwrap();

    let mut session = ClientSession::new();
    session.sign_in(registered.token.clone(), &registered.customer);
    assert_eq!(session.area(), Some("Kidwai Nagar"));
    let schemes = system.resolver.list_schemes_for_area("Kidwai Nagar").await.unwrap();
    session.add_to_cart(&schemes[0]).unwrap();
    session.add_to_cart(&schemes[0]).unwrap();
    session.add_to_cart(&schemes[1]).unwrap();
    assert_eq!(session.total(), 2200.0);

    let receipt = session
        .checkout(
            &system.workflow,
            Contact {
                name: "Asha".into(),
                mobile: "123".into(),
                address: "X".into(),
            },
        )
        .await
        .unwrap();
    assert!(receipt.is_complete());
    assert!(session.cart().is_empty());

    let mut orders = watch_own_orders(system.workflow.clone(), registered.token, Duration::from_millis(20));
    let snapshot = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            orders.changed().await.unwrap();
            let current = orders.borrow_and_update().clone();
            if !current.is_empty() {
                break current;
            }
        }
    })
    .await
    .unwrap();
    assert_eq!(snapshot.len(), 2);
    assert!(snapshot.iter().all(|o| o.customer_id == Some(registered.customer.id)));
}

#[tokio::test]
async fn test_order_watch_uses_configured_interval() {
    let config = Config {
        bcrypt_cost: 4,
        order_poll_secs: 30,
        ..Config::default()
    };
    let system = StorefrontSystem::start(&config);
    assert_eq!(system.order_poll_interval(), Duration::from_secs(30));

    let registered = system
        .auth
        .register_customer(registration("asha@example.com"))
        .await
        .unwrap();
    let mut orders = system.watch_own_orders(registered.token);

    // The first read happens right away; the next one is a full interval off.
    tokio::time::timeout(Duration::from_secs(5), orders.changed())
        .await
        .unwrap()
        .unwrap();
    assert!(orders.borrow_and_update().is_empty());
    assert!(tokio::time::timeout(Duration::from_millis(200), orders.changed()).await.is_err());
}

#[tokio::test]
async fn test_shutdown_stops_all_actors() {
    let system = seeded().await;
    tokio::time::timeout(Duration::from_secs(5), system.shutdown())
        .await
        .unwrap()
        .unwrap();
}
