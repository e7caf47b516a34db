//! Error types for the Scheme actor.

use crate::error::{NotFoundError, ServiceError, ValidationError};
use resource_actor::FrameworkError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SchemeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Scheme not found: {0}")]
    NotFound(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for SchemeError {
    fn from(e: FrameworkError) -> Self {
        match e.into_entity_error::<SchemeError>() {
            Ok(e) => e,
            Err(FrameworkError::NotFound(id)) => SchemeError::NotFound(id),
            Err(other) => SchemeError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl From<SchemeError> for ServiceError {
    fn from(e: SchemeError) -> Self {
        match e {
            SchemeError::Validation(e) => e.into(),
            SchemeError::NotFound(id) => NotFoundError::Scheme(id).into(),
            SchemeError::ActorCommunicationError(msg) => ServiceError::unavailable(msg),
        }
    }
}
