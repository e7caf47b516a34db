//! [`ActorEntity`] implementation for [`Customer`].

use super::CustomerError;
use crate::error::{require, ValidationError};
use crate::model::{Customer, CustomerCreate, CustomerId, CustomerUpdate};
use async_trait::async_trait;
use chrono::Utc;
use resource_actor::ActorEntity;

#[async_trait]
impl ActorEntity for Customer {
    type Id = CustomerId;
    type Create = CustomerCreate;
    type Update = CustomerUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = CustomerError;

    fn from_create_params(id: CustomerId, params: CustomerCreate) -> Result<Self, Self::Error> {
        require("username", &params.username)?;
        require("email", &params.email)?;
        if !params.email.contains('@') {
            return Err(ValidationError::InvalidField {
                field: "email",
                reason: "must contain @",
            }
            .into());
        }

        Ok(Self {
            id,
            username: params.username.trim().to_string(),
            email: Customer::normalize_email(&params.email),
            password_hash: params.password_hash,
            mobile: params.mobile,
            address: params.address,
            area: params.area.filter(|a| !a.trim().is_empty()),
            created_at: Utc::now(),
        })
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.email.clone())
    }

    async fn on_update(&mut self, update: CustomerUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(username) = update.username {
            require("username", &username)?;
            self.username = username.trim().to_string();
        }
        if let Some(address) = update.address {
            self.address = address;
        }
        if let Some(area) = update.area {
            self.area = Some(area).filter(|a| !a.trim().is_empty());
        }
        if let Some(hash) = update.password_hash {
            self.password_hash = hash;
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}
