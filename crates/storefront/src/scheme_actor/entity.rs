//! [`ActorEntity`] implementation for [`Scheme`].

use super::SchemeError;
use crate::error::ValidationError;
use crate::model::{Scheme, SchemeCreate, SchemeId};
use async_trait::async_trait;
use resource_actor::ActorEntity;

#[async_trait]
impl ActorEntity for Scheme {
    type Id = SchemeId;
    type Create = SchemeCreate;
    type Update = ();
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = SchemeError;

    fn from_create_params(id: SchemeId, params: SchemeCreate) -> Result<Self, Self::Error> {
        if !params.price.is_finite() || params.price <= 0.0 {
            return Err(ValidationError::InvalidField {
                field: "price",
                reason: "must be a positive number",
            }
            .into());
        }
        Ok(Self {
            id,
            area: params.area,
            product: params.product,
            price: params.price,
            offer: params.offer.trim().to_string(),
        })
    }

    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}
