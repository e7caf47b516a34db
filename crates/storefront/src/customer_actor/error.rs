//! Error types for the Customer actor.

use crate::error::{AuthError, NotFoundError, ServiceError, ValidationError};
use resource_actor::FrameworkError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CustomerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Email already registered: {0}")]
    EmailTaken(String),

    #[error("Customer not found: {0}")]
    NotFound(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for CustomerError {
    fn from(e: FrameworkError) -> Self {
        match e.into_entity_error::<CustomerError>() {
            Ok(e) => e,
            Err(FrameworkError::Conflict(key)) => CustomerError::EmailTaken(key),
            Err(FrameworkError::NotFound(id)) => CustomerError::NotFound(id),
            Err(other) => CustomerError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl From<CustomerError> for ServiceError {
    fn from(e: CustomerError) -> Self {
        match e {
            CustomerError::Validation(e) => e.into(),
            CustomerError::EmailTaken(_) => AuthError::AlreadyExists("Customer".into()).into(),
            CustomerError::NotFound(id) => NotFoundError::Customer(id).into(),
            CustomerError::ActorCommunicationError(msg) => ServiceError::unavailable(msg),
        }
    }
}
