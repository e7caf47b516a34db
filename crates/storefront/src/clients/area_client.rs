use crate::area_actor::AreaError;
use crate::model::{Area, AreaCreate, AreaId};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for the Area actor.
#[derive(Clone)]
pub struct AreaClient {
    inner: ResourceClient<Area>,
}

impl AreaClient {
    pub fn new(inner: ResourceClient<Area>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_area(&self, params: AreaCreate) -> Result<AreaId, AreaError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Exact name match. With duplicate names the oldest area wins.
    #[instrument(skip(self))]
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Area>, AreaError> {
        let name = name.to_string();
        self.inner
            .find_one(move |area| area.name == name)
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Area> for AreaClient {
    type Error = AreaError;

    fn inner(&self) -> &ResourceClient<Area> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.into()
    }
}
