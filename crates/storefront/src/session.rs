//! # Client Session
//!
//! What a storefront client keeps between requests: the selected area, the cart and the
//! customer's token. Checkout turns the cart into one bulk order.
//!
//! [`watch_own_orders`] keeps a signed-in customer's order list fresh by polling.

use crate::auth::SignedClaim;
use crate::error::{AuthError, ServiceError, ValidationError};
use crate::model::{CustomerView, Order, SchemeId, SchemeWithProduct};
use crate::orders::{BulkOrderForm, BulkOrderReceipt, CartLine, OrderWorkflow};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// How often a signed-in client re-reads its orders unless configured otherwise.
pub const DEFAULT_ORDER_POLL: Duration = Duration::from_secs(5);

/// One scheme in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub scheme: SchemeId,
    pub product: String,
    pub price: f64,
    pub quantity: u32,
}

/// Delivery details entered at checkout.
#[derive(Debug, Clone, Default)]
pub struct Contact {
    pub name: String,
    pub mobile: String,
    pub address: String,
}

#[derive(Debug, Clone, Default)]
pub struct ClientSession {
    area: Option<String>,
    cart: Vec<CartItem>,
    token: Option<SignedClaim>,
}

impl ClientSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_area(&mut self, area_name: impl Into<String>) {
        self.area = Some(area_name.into());
    }

    pub fn area(&self) -> Option<&str> {
        self.area.as_deref()
    }

    /// Keeps the customer's token. With no area picked yet, the customer's saved area is
    /// used.
    pub fn sign_in(&mut self, token: SignedClaim, customer: &CustomerView) {
        self.token = Some(token);
        if self.area.is_none() {
            self.area = customer.area.clone().filter(|area| !area.trim().is_empty());
        }
    }

    /// Forgets the token, the area and the cart.
    pub fn sign_out(&mut self) {
        *self = Self::default();
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_ref().map(SignedClaim::as_str)
    }

    /// Adds one of `scheme`. A scheme already in the cart gets its quantity bumped.
    ///
    /// A scheme whose product is gone cannot be bought.
    pub fn add_to_cart(&mut self, scheme: &SchemeWithProduct) -> Result<(), ValidationError> {
        let product = scheme.product.as_ref().ok_or(ValidationError::InvalidField {
            field: "product",
            reason: "is no longer available",
        })?;

        match self.cart.iter_mut().find(|item| item.scheme == scheme.id) {
            Some(item) => item.quantity += 1,
            None => self.cart.push(CartItem {
                scheme: scheme.id,
                product: product.name.clone(),
                price: scheme.price,
                quantity: 1,
            }),
        }
        Ok(())
    }

    /// Moves a line's quantity by `delta`, never below 1. Returns the new quantity.
    pub fn change_quantity(&mut self, scheme: SchemeId, delta: i64) -> Option<u32> {
        let item = self.cart.iter_mut().find(|item| item.scheme == scheme)?;
        let quantity = (i64::from(item.quantity) + delta).clamp(1, i64::from(u32::MAX));
        item.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        Some(item.quantity)
    }

    pub fn remove(&mut self, scheme: SchemeId) -> bool {
        let before = self.cart.len();
        self.cart.retain(|item| item.scheme != scheme);
        self.cart.len() != before
    }

    pub fn cart(&self) -> &[CartItem] {
        &self.cart
    }

    pub fn total(&self) -> f64 {
        self.cart.iter().map(|item| item.price * f64::from(item.quantity)).sum()
    }

    /// The bulk order the current cart would place.
    pub fn checkout_form(&self, contact: Contact) -> Result<BulkOrderForm, ValidationError> {
        let area_name = self.area.clone().ok_or(ValidationError::MissingField("area"))?;
        if self.cart.is_empty() {
            return Err(ValidationError::MissingField("items"));
        }
        Ok(BulkOrderForm {
            name: contact.name,
            mobile: contact.mobile,
            address: contact.address,
            area_name,
            items: self
                .cart
                .iter()
                .map(|item| CartLine {
                    product_name: item.product.clone(),
                    quantity: item.quantity,
                    price: item.price,
                })
                .collect(),
        })
    }

    /// Places the cart. The cart is emptied only if every line was placed, so a partial
    /// failure can be retried.
    pub async fn checkout(&mut self, workflow: &OrderWorkflow, contact: Contact) -> Result<BulkOrderReceipt, ServiceError> {
        let form = self.checkout_form(contact)?;
        let receipt = workflow.place_bulk_order(self.token(), form).await?;
        if receipt.is_complete() {
            self.cart.clear();
        } else {
            info!(failed = receipt.failures.len(), "Cart kept after partial checkout");
        }
        Ok(receipt)
    }
}

/// Polls the customer's own orders every `every` and publishes each snapshot.
///
/// The first poll happens right away. Read failures are logged and retried on the next
/// tick; an authentication failure ends polling since retrying cannot fix it. Polling
/// also stops once every receiver is dropped.
pub fn watch_own_orders(workflow: OrderWorkflow, token: SignedClaim, every: Duration) -> watch::Receiver<Vec<Order>> {
    let (tx, rx) = watch::channel(Vec::new());
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            tokio::select! {
                _ = tx.closed() => break,
                _ = ticker.tick() => {}
            }
            match workflow.list_own_orders(Some(token.as_str())).await {
                Ok(orders) => {
                    debug!(count = orders.len(), "Order snapshot");
                    if tx.send(orders).is_err() {
                        break;
                    }
                }
                Err(ServiceError::Auth(e @ (AuthError::MissingToken | AuthError::InvalidToken))) => {
                    warn!(error = %e, "Stopped polling orders");
                    break;
                }
                Err(e) => warn!(error = %e, "Order poll failed, retrying"),
            }
        }
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{ClaimSigner, JwtSigner, Principal};
    use crate::model::{AreaId, CustomerId, Product, ProductId};
    use chrono::Utc;

    fn scheme(id: u32, product: &str, price: f64) -> SchemeWithProduct {
        SchemeWithProduct {
            id: SchemeId::from(id),
            area: AreaId::from(1),
            product: Some(Product {
                id: ProductId::from(id),
                name: product.to_string(),
                image: String::new(),
            }),
            price,
            offer: String::new(),
        }
    }

    #[test]
    fn test_adding_twice_bumps_quantity() {
        let mut session = ClientSession::new();
        let almond = scheme(1, "Almond", 700.0);
        session.add_to_cart(&almond).unwrap();
        session.add_to_cart(&almond).unwrap();
        session.add_to_cart(&scheme(2, "Cashew", 800.0)).unwrap();

        assert_eq!(session.cart().len(), 2);
        assert_eq!(session.cart()[0].quantity, 2);
        assert_eq!(session.total(), 2200.0);
    }

    #[test]
    fn test_quantity_never_drops_below_one() {
        let mut session = ClientSession::new();
        session.add_to_cart(&scheme(1, "Almond", 700.0)).unwrap();

        assert_eq!(session.change_quantity(SchemeId::from(1), -5), Some(1));
        assert_eq!(session.change_quantity(SchemeId::from(1), 2), Some(3));
        assert_eq!(session.change_quantity(SchemeId::from(9), 1), None);
    }

    #[test]
    fn test_remove_and_unavailable_product() {
        let mut session = ClientSession::new();
        session.add_to_cart(&scheme(1, "Almond", 700.0)).unwrap();
        assert!(session.remove(SchemeId::from(1)));
        assert!(!session.remove(SchemeId::from(1)));

        let mut orphan = scheme(3, "Gone", 100.0);
        orphan.product = None;
        assert!(session.add_to_cart(&orphan).is_err());
        assert!(session.cart().is_empty());
    }

    fn customer(area: Option<&str>) -> CustomerView {
        CustomerView {
            id: CustomerId::from(1),
            username: "Asha".into(),
            email: "asha@example.com".into(),
            mobile: String::new(),
            address: String::new(),
            area: area.map(str::to_string),
            created_at: Utc::now(),
        }
    }

    fn token() -> SignedClaim {
        JwtSigner::new("session-test-secret")
            .sign(Principal::Customer(CustomerId::from(1)), chrono::Duration::hours(1))
            .unwrap()
    }

    #[test]
    fn test_sign_in_falls_back_to_saved_area() {
        let mut session = ClientSession::new();
        session.sign_in(token(), &customer(Some("Saket Nagar")));
        assert_eq!(session.area(), Some("Saket Nagar"));
        assert!(session.token().is_some());

        let mut session = ClientSession::new();
        session.select_area("Hanspuram");
        session.sign_in(token(), &customer(Some("Saket Nagar")));
        assert_eq!(session.area(), Some("Hanspuram"));

        let mut session = ClientSession::new();
        session.sign_in(token(), &customer(None));
        assert_eq!(session.area(), None);
    }

    #[test]
    fn test_checkout_form_needs_area_and_items() {
        let mut session = ClientSession::new();
        assert_eq!(
            session.checkout_form(Contact::default()).unwrap_err(),
            ValidationError::MissingField("area")
        );

        session.select_area("Kidwai Nagar");
        assert_eq!(
            session.checkout_form(Contact::default()).unwrap_err(),
            ValidationError::MissingField("items")
        );

        session.add_to_cart(&scheme(1, "Almond", 700.0)).unwrap();
        let form = session
            .checkout_form(Contact {
                name: "A".into(),
                mobile: "123".into(),
                address: "X".into(),
            })
            .unwrap();
        assert_eq!(form.area_name, "Kidwai Nagar");
        assert_eq!(form.items[0].product_name, "Almond");
    }
}
