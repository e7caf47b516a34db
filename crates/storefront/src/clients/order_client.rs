//! # Order Client
//!
//! Provides a high-level API for the `Order` actor. Validation lives in the entity;
//! the client only forwards and maps errors.

use crate::model::{CustomerId, Order, OrderAction, OrderCreate, OrderId, OrderStatus};
use crate::order_actor::OrderError;
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn place(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn set_status(&self, id: OrderId, status: OrderStatus) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, OrderAction::SetStatus(status))
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn list_for_customer(&self, customer: CustomerId) -> Result<Vec<Order>, OrderError> {
        self.inner
            .find(move |order| order.customer_id == Some(customer))
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.into()
    }
}
