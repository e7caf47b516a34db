//! Error types for the Product actor.

use crate::error::{NotFoundError, ServiceError, ValidationError};
use resource_actor::FrameworkError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Product not found: {0}")]
    NotFound(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for ProductError {
    fn from(e: FrameworkError) -> Self {
        match e.into_entity_error::<ProductError>() {
            Ok(e) => e,
            Err(FrameworkError::NotFound(id)) => ProductError::NotFound(id),
            Err(other) => ProductError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl From<ProductError> for ServiceError {
    fn from(e: ProductError) -> Self {
        match e {
            ProductError::Validation(e) => e.into(),
            ProductError::NotFound(id) => NotFoundError::Product(id).into(),
            ProductError::ActorCommunicationError(msg) => ServiceError::unavailable(msg),
        }
    }
}
