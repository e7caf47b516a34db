//! # Order Workflow
//!
//! Places single and bulk (cart) orders and drives order status.
//!
//! Anyone may place an order. A valid customer claim attaches the order to that
//! customer; a missing or unusable one makes it a guest order. New orders always start
//! `Pending`, whatever the client sent.
//!
//! ## Bulk orders
//!
//! A cart becomes one order per line, sharing the delivery details. Every line is
//! validated before anything is written, so a bad line rejects the whole cart. The
//! lines are then placed concurrently and the outcome is reported per line in a
//! [`BulkOrderReceipt`]; lines that were placed stay placed even if others failed.

use crate::auth::AuthGateway;
use crate::clients::OrderClient;
use crate::error::{NotFoundError, ServiceError, ValidationError};
use crate::model::numeric::number_or_text;
use crate::model::{Order, OrderCreate, OrderId, OrderStatus};
use crate::order_actor::entity::validate;
use futures::future::join_all;
use resource_actor::ActorClient;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// A single order as submitted by a client.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderForm {
    pub name: String,
    pub mobile: String,
    pub address: String,
    #[serde(rename = "area")]
    pub area_name: String,
    #[serde(rename = "product")]
    pub product_name: String,
    #[serde(deserialize_with = "number_or_text")]
    pub quantity: u32,
}

/// One line of a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(rename = "product")]
    pub product_name: String,
    #[serde(deserialize_with = "number_or_text")]
    pub quantity: u32,
    #[serde(deserialize_with = "number_or_text")]
    pub price: f64,
}

/// A whole cart with its shared delivery details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkOrderForm {
    pub name: String,
    pub mobile: String,
    pub address: String,
    #[serde(rename = "area")]
    pub area_name: String,
    pub items: Vec<CartLine>,
}

/// A cart line that could not be placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkFailure {
    /// Position in the submitted cart.
    pub index: usize,
    pub product: String,
    pub message: String,
}

/// Per-line outcome of a bulk order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkOrderReceipt {
    pub orders: Vec<Order>,
    pub failures: Vec<BulkFailure>,
}

impl BulkOrderReceipt {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn is_total_failure(&self) -> bool {
        self.orders.is_empty() && !self.failures.is_empty()
    }
}

#[derive(Clone)]
pub struct OrderWorkflow {
    orders: OrderClient,
    auth: AuthGateway,
}

impl OrderWorkflow {
    pub fn new(orders: OrderClient, auth: AuthGateway) -> Self {
        Self { orders, auth }
    }

    #[instrument(skip(self, token))]
    pub async fn place_order(&self, token: Option<&str>, form: OrderForm) -> Result<Order, ServiceError> {
        let customer_id = self.auth.optional_customer(token);
        let params = OrderCreate {
            name: form.name,
            mobile: form.mobile,
            address: form.address,
            area_name: form.area_name,
            product_name: form.product_name,
            quantity: form.quantity,
            customer_id,
        };
        validate(&params)?;

        let order = self.place(params).await?;
        info!(order_id = %order.id, customer_id = ?order.customer_id, "Order placed");
        Ok(order)
    }

    #[instrument(skip(self, token, form), fields(lines = form.items.len()))]
    pub async fn place_bulk_order(&self, token: Option<&str>, form: BulkOrderForm) -> Result<BulkOrderReceipt, ServiceError> {
        if form.items.is_empty() {
            return Err(ValidationError::MissingField("items").into());
        }
        let customer_id = self.auth.optional_customer(token);

        let mut lines = Vec::with_capacity(form.items.len());
        for line in form.items {
            if !line.price.is_finite() || line.price <= 0.0 {
                return Err(ValidationError::InvalidField {
                    field: "price",
                    reason: "must be a positive number",
                }
                .into());
            }
            let params = OrderCreate {
                name: form.name.clone(),
                mobile: form.mobile.clone(),
                address: form.address.clone(),
                area_name: form.area_name.clone(),
                product_name: line.product_name,
                quantity: line.quantity,
                customer_id,
            };
            validate(&params)?;
            lines.push(params);
        }

        let outcomes = join_all(lines.into_iter().map(|params| async move {
            let product = params.product_name.clone();
            (product, self.place(params).await)
        }))
        .await;

        let mut receipt = BulkOrderReceipt {
            orders: Vec::new(),
            failures: Vec::new(),
        };
        for (index, (product, outcome)) in outcomes.into_iter().enumerate() {
            match outcome {
                Ok(order) => receipt.orders.push(order),
                Err(e) => {
                    warn!(index, %product, error = %e, "Cart line failed");
                    receipt.failures.push(BulkFailure {
                        index,
                        product,
                        message: e.to_string(),
                    });
                }
            }
        }

        info!(
            placed = receipt.orders.len(),
            failed = receipt.failures.len(),
            customer_id = ?customer_id,
            "Bulk order placed"
        );
        Ok(receipt)
    }

    /// Every order, newest first.
    pub async fn list_all_orders(&self, token: Option<&str>) -> Result<Vec<Order>, ServiceError> {
        self.auth.require_admin(token)?;
        Ok(newest_first(self.orders.list().await?))
    }

    /// The caller's own orders, newest first.
    pub async fn list_own_orders(&self, token: Option<&str>) -> Result<Vec<Order>, ServiceError> {
        let customer = self.auth.require_customer(token)?;
        Ok(newest_first(self.orders.list_for_customer(customer).await?))
    }

    /// Sets any of the five statuses. Anything else is
    /// [`ValidationError::InvalidStatus`] and the order is left alone.
    #[instrument(skip(self, token))]
    pub async fn set_order_status(&self, token: Option<&str>, id: OrderId, status: &str) -> Result<Order, ServiceError> {
        self.auth.require_admin(token)?;
        let status: OrderStatus = status.parse()?;
        Ok(self.orders.set_status(id, status).await?)
    }

    async fn place(&self, params: OrderCreate) -> Result<Order, ServiceError> {
        let id = self.orders.place(params).await?;
        self.orders
            .get(id)
            .await?
            .ok_or_else(|| NotFoundError::Order(id.to_string()).into())
    }
}

fn newest_first(mut orders: Vec<Order>) -> Vec<Order> {
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    orders
}
