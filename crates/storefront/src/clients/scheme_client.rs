use crate::model::{AreaId, Scheme, SchemeCreate, SchemeId};
use crate::scheme_actor::SchemeError;
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for the Scheme actor. Also the Area actor's context.
#[derive(Clone)]
pub struct SchemeClient {
    inner: ResourceClient<Scheme>,
}

impl SchemeClient {
    pub fn new(inner: ResourceClient<Scheme>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_scheme(&self, params: SchemeCreate) -> Result<SchemeId, SchemeError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn list_for_area(&self, area: AreaId) -> Result<Vec<Scheme>, SchemeError> {
        self.inner
            .find(move |scheme| scheme.area == area)
            .await
            .map_err(Self::map_error)
    }

    /// Deletes every scheme of `area` and returns their ids.
    #[instrument(skip(self))]
    pub async fn purge_area(&self, area: AreaId) -> Result<Vec<SchemeId>, SchemeError> {
        debug!("Sending request");
        self.inner
            .delete_where(move |scheme| scheme.area == area)
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Scheme> for SchemeClient {
    type Error = SchemeError;

    fn inner(&self) -> &ResourceClient<Scheme> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.into()
    }
}
