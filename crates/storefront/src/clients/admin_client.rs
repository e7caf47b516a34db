use crate::admin_actor::AdminError;
use crate::model::{AdminId, Administrator, AdministratorCreate};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for the Administrator actor.
#[derive(Clone)]
pub struct AdminClient {
    inner: ResourceClient<Administrator>,
}

impl AdminClient {
    pub fn new(inner: ResourceClient<Administrator>) -> Self {
        Self { inner }
    }

    /// Fails with [`AdminError::UsernameTaken`] if the username is in use.
    #[instrument(skip(self, params), fields(username = %params.username))]
    pub async fn create_admin(&self, params: AdministratorCreate) -> Result<AdminId, AdminError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn find_by_username(&self, username: &str) -> Result<Option<Administrator>, AdminError> {
        let username = username.trim().to_string();
        self.inner
            .find_one(move |admin| admin.username == username)
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Administrator> for AdminClient {
    type Error = AdminError;

    fn inner(&self) -> &ResourceClient<Administrator> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.into()
    }
}
