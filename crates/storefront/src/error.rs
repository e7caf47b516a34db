//! # Error Taxonomy
//!
//! Errors raised by the storefront services, grouped by concern. Each actor has its own
//! error type (see the `*_actor::error` modules); the services fold those into
//! [`ServiceError`], which the HTTP layer maps onto status codes.

use thiserror::Error;

/// Authentication and authorization failures.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    #[error("No token, authorization denied")]
    MissingToken,

    /// Forged, expired, or of the wrong principal kind.
    #[error("Token is not valid")]
    InvalidToken,

    /// Unknown account and wrong password are deliberately indistinguishable.
    #[error("Invalid Credentials")]
    InvalidCredentials,

    #[error("Not authorized")]
    NotAuthorized,

    #[error("{0} already exists")]
    AlreadyExists(String),
}

/// A referenced record does not exist.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum NotFoundError {
    #[error("Area not found: {0}")]
    Area(String),

    #[error("Product not found: {0}")]
    Product(String),

    #[error("Scheme not found: {0}")]
    Scheme(String),

    #[error("Order not found: {0}")]
    Order(String),

    #[error("Customer not found: {0}")]
    Customer(String),
}

/// Input rejected before anything was written.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Invalid {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: &'static str,
    },
}

/// Infrastructure failures. Details are logged, never shown to clients.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Blob store error: {0}")]
    Blob(String),

    #[error("Credential backend error: {0}")]
    Crypto(String),
}

/// Umbrella error returned by the Auth Gateway, Scheme Resolver and Order Workflow.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ServiceError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    pub fn unavailable(e: impl std::fmt::Display) -> Self {
        ServiceError::Store(StoreError::Unavailable(e.to_string()))
    }
}

/// Non-empty after trimming, or [`ValidationError::MissingField`].
pub fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_messages_match_wire_contract() {
        assert_eq!(
            AuthError::MissingToken.to_string(),
            "No token, authorization denied"
        );
        assert_eq!(AuthError::InvalidToken.to_string(), "Token is not valid");
        assert_eq!(AuthError::InvalidCredentials.to_string(), "Invalid Credentials");
    }

    #[test]
    fn test_require_rejects_blank() {
        assert_eq!(require("name", "  "), Err(ValidationError::MissingField("name")));
        assert!(require("name", "Almond").is_ok());
    }
}
