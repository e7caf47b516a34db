//! [`ActorEntity`] implementation for [`Administrator`].

use super::AdminError;
use crate::error::require;
use crate::model::{AdminId, Administrator, AdministratorCreate};
use async_trait::async_trait;
use resource_actor::ActorEntity;

#[async_trait]
impl ActorEntity for Administrator {
    type Id = AdminId;
    type Create = AdministratorCreate;
    type Update = ();
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = AdminError;

    fn from_create_params(id: AdminId, params: AdministratorCreate) -> Result<Self, Self::Error> {
        require("username", &params.username)?;
        Ok(Self {
            id,
            username: params.username.trim().to_string(),
            password_hash: params.password_hash,
        })
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.username.clone())
    }

    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}
