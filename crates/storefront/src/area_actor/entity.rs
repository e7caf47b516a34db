//! [`ActorEntity`] implementation for [`Area`].

use super::AreaError;
use crate::clients::SchemeClient;
use crate::error::require;
use crate::model::{Area, AreaCreate, AreaId};
use async_trait::async_trait;
use resource_actor::ActorEntity;
use tracing::info;

#[async_trait]
impl ActorEntity for Area {
    type Id = AreaId;
    type Create = AreaCreate;
    type Update = ();
    type Action = ();
    type ActionResult = ();
    type Context = SchemeClient;
    type Error = AreaError;

    fn from_create_params(id: AreaId, params: AreaCreate) -> Result<Self, Self::Error> {
        require("name", &params.name)?;
        Ok(Self {
            id,
            name: params.name.trim().to_string(),
        })
    }

    async fn on_update(&mut self, _update: (), _ctx: &SchemeClient) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Removes the area's schemes first. If that fails the area stays, so no scheme is
    /// left pointing at a missing area.
    async fn on_delete(&self, schemes: &SchemeClient) -> Result<(), Self::Error> {
        let purged = schemes
            .purge_area(self.id)
            .await
            .map_err(|e| AreaError::SchemePurgeFailed(e.to_string()))?;
        info!(area_id = %self.id, purged = purged.len(), "Schemes purged");
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &SchemeClient) -> Result<(), Self::Error> {
        Ok(())
    }
}
