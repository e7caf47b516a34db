//! Error types for the Area actor.

use crate::error::{NotFoundError, ServiceError, ValidationError};
use resource_actor::FrameworkError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AreaError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Area not found: {0}")]
    NotFound(String),

    /// The cascade to schemes failed; the area was kept.
    #[error("Failed to remove schemes of area: {0}")]
    SchemePurgeFailed(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for AreaError {
    fn from(e: FrameworkError) -> Self {
        match e.into_entity_error::<AreaError>() {
            Ok(e) => e,
            Err(FrameworkError::NotFound(id)) => AreaError::NotFound(id),
            Err(other) => AreaError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl From<AreaError> for ServiceError {
    fn from(e: AreaError) -> Self {
        match e {
            AreaError::Validation(e) => e.into(),
            AreaError::NotFound(id) => NotFoundError::Area(id).into(),
            AreaError::SchemePurgeFailed(msg) | AreaError::ActorCommunicationError(msg) => {
                ServiceError::unavailable(msg)
            }
        }
    }
}
