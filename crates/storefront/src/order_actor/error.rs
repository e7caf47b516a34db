//! Error types for the Order actor.

use crate::error::{NotFoundError, ServiceError, ValidationError};
use resource_actor::FrameworkError;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The order data provided is invalid.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for OrderError {
    fn from(e: FrameworkError) -> Self {
        match e.into_entity_error::<OrderError>() {
            Ok(e) => e,
            Err(FrameworkError::NotFound(id)) => OrderError::NotFound(id),
            Err(other) => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl From<OrderError> for ServiceError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::Validation(e) => e.into(),
            OrderError::NotFound(id) => NotFoundError::Order(id).into(),
            OrderError::ActorCommunicationError(msg) => ServiceError::unavailable(msg),
        }
    }
}
