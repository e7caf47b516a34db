//! # Session Claims
//!
//! Both principal kinds share one signing mechanism. The payload carries exactly one of
//! `admin: {id}` or `customer: {id}`, and [`ClaimSigner::open`] turns it back into a
//! [`Principal`] only when exactly one is present.

use crate::error::{AuthError, StoreError};
use crate::model::{AdminId, CustomerId};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Who a verified claim speaks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Principal {
    Administrator(AdminId),
    Customer(CustomerId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrincipalKind {
    Administrator,
    Customer,
}

impl Principal {
    pub fn kind(&self) -> PrincipalKind {
        match self {
            Principal::Administrator(_) => PrincipalKind::Administrator,
            Principal::Customer(_) => PrincipalKind::Customer,
        }
    }
}

/// An issued session token, opaque to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignedClaim(pub String);

impl SignedClaim {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Subject<I> {
    id: I,
}

#[derive(Debug, Serialize, Deserialize)]
struct ClaimPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    admin: Option<Subject<AdminId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    customer: Option<Subject<CustomerId>>,
    exp: i64,
}

/// Issues and checks signed, expiring claims.
pub trait ClaimSigner: Send + Sync {
    fn sign(&self, principal: Principal, ttl: chrono::Duration) -> Result<SignedClaim, StoreError>;

    /// Any failure (bad signature, expired, malformed, ambiguous) is
    /// [`AuthError::InvalidToken`].
    fn open(&self, token: &str) -> Result<Principal, AuthError>;
}

/// HS256 JSON Web Tokens.
pub struct JwtSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtSigner {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }
}

impl ClaimSigner for JwtSigner {
    fn sign(&self, principal: Principal, ttl: chrono::Duration) -> Result<SignedClaim, StoreError> {
        let exp = chrono::Utc::now()
            .checked_add_signed(ttl)
            .unwrap_or_else(chrono::Utc::now)
            .timestamp();

        let payload = match principal {
            Principal::Administrator(id) => ClaimPayload {
                admin: Some(Subject { id }),
                customer: None,
                exp,
            },
            Principal::Customer(id) => ClaimPayload {
                admin: None,
                customer: Some(Subject { id }),
                exp,
            },
        };

        encode(&Header::new(Algorithm::HS256), &payload, &self.encoding)
            .map(SignedClaim)
            .map_err(|e| StoreError::Crypto(e.to_string()))
    }

    fn open(&self, token: &str) -> Result<Principal, AuthError> {
        let data = decode::<ClaimPayload>(token, &self.decoding, &self.validation).map_err(|e| {
            debug!(error = %e, "Claim rejected");
            AuthError::InvalidToken
        })?;

        match (data.claims.admin, data.claims.customer) {
            (Some(admin), None) => Ok(Principal::Administrator(admin.id)),
            (None, Some(customer)) => Ok(Principal::Customer(customer.id)),
            _ => {
                debug!("Claim names no principal or both");
                Err(AuthError::InvalidToken)
            }
        }
    }
}
