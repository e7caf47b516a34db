//! Error types for the Administrator actor.

use crate::error::{AuthError, ServiceError, ValidationError};
use resource_actor::FrameworkError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AdminError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    #[error("Administrator not found: {0}")]
    NotFound(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for AdminError {
    fn from(e: FrameworkError) -> Self {
        match e.into_entity_error::<AdminError>() {
            Ok(e) => e,
            Err(FrameworkError::Conflict(key)) => AdminError::UsernameTaken(key),
            Err(FrameworkError::NotFound(id)) => AdminError::NotFound(id),
            Err(other) => AdminError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl From<AdminError> for ServiceError {
    fn from(e: AdminError) -> Self {
        match e {
            AdminError::Validation(e) => e.into(),
            AdminError::UsernameTaken(_) => AuthError::AlreadyExists("Administrator".into()).into(),
            // Administrators are only looked up while checking a claim.
            AdminError::NotFound(_) => AuthError::InvalidToken.into(),
            AdminError::ActorCommunicationError(msg) => ServiceError::unavailable(msg),
        }
    }
}
