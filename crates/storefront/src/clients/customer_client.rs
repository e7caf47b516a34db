use crate::customer_actor::CustomerError;
use crate::model::{Customer, CustomerCreate, CustomerId, CustomerUpdate};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for the Customer actor.
#[derive(Clone)]
pub struct CustomerClient {
    inner: ResourceClient<Customer>,
}

impl CustomerClient {
    pub fn new(inner: ResourceClient<Customer>) -> Self {
        Self { inner }
    }

    /// Fails with [`CustomerError::EmailTaken`] if the email is already registered.
    #[instrument(skip(self, params), fields(email = %params.email))]
    pub async fn register(&self, params: CustomerCreate) -> Result<CustomerId, CustomerError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Case- and whitespace-insensitive email lookup.
    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, CustomerError> {
        let email = Customer::normalize_email(email);
        self.inner
            .find_one(move |customer| customer.email == email)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self, update))]
    pub async fn update_profile(
        &self,
        id: CustomerId,
        update: CustomerUpdate,
    ) -> Result<Customer, CustomerError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Customer> for CustomerClient {
    type Error = CustomerError;

    fn inner(&self) -> &ResourceClient<Customer> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.into()
    }
}
