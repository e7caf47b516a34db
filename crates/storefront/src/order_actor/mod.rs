//! # Order Actor
//!
//! Keeps orders. Orders are never deleted; their only mutation is the
//! [`SetStatus`](crate::model::OrderAction::SetStatus) action.
//!
//! ## Usage
//!
//! ```rust
//! use storefront::order_actor;
//! use storefront::model::{OrderAction, OrderCreate, OrderStatus};
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = order_actor::new(8);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client
//!         .place(OrderCreate {
//!             name: "A".into(),
//!             mobile: "123".into(),
//!             address: "X".into(),
//!             area_name: "Kidwai Nagar".into(),
//!             product_name: "Almond".into(),
//!             quantity: 2,
//!             customer_id: None,
//!         })
//!         .await
//!         .unwrap();
//!
//!     let order = client.set_status(id, OrderStatus::Shipped).await.unwrap();
//!     assert_eq!(order.status, OrderStatus::Shipped);
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::OrderClient;
use crate::model::Order;
use resource_actor::ResourceActor;

/// Creates the Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, OrderClient::new(generic_client))
}
