//! [`ActorEntity`] implementation for [`Order`].

use super::OrderError;
use crate::error::{require, ValidationError};
use crate::model::{Order, OrderAction, OrderCreate, OrderId, OrderStatus};
use async_trait::async_trait;
use chrono::Utc;
use resource_actor::ActorEntity;
use tracing::{info, warn};

/// Checks every field of an order payload without allocating an id.
pub fn validate(params: &OrderCreate) -> Result<(), ValidationError> {
    require("name", &params.name)?;
    require("mobile", &params.mobile)?;
    require("address", &params.address)?;
    require("area", &params.area_name)?;
    require("product", &params.product_name)?;
    if params.quantity < 1 {
        return Err(ValidationError::InvalidField {
            field: "quantity",
            reason: "must be at least 1",
        });
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = ();
    type Action = OrderAction;
    type ActionResult = Order;
    type Context = ();
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        validate(&params)?;
        Ok(Self {
            id,
            name: params.name,
            mobile: params.mobile,
            address: params.address,
            area_name: params.area_name,
            product_name: params.product_name,
            quantity: params.quantity,
            customer_id: params.customer_id,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        })
    }

    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(&mut self, action: OrderAction, _ctx: &()) -> Result<Order, Self::Error> {
        match action {
            OrderAction::SetStatus(next) => {
                let previous = self.status;
                if previous != next && !previous.can_transition_to(next) {
                    warn!(order_id = %self.id, %previous, %next, "Status moved off the fulfilment path");
                }
                self.status = next;
                info!(order_id = %self.id, %previous, %next, "Status changed");
                Ok(self.clone())
            }
        }
    }
}
