//! # Authentication
//!
//! - [`claims`]: the signed session claim and the [`ClaimSigner`] capability (JWT).
//! - [`password`]: the [`PasswordHasher`] capability (bcrypt).
//! - [`gateway`]: the [`AuthGateway`] that issues sessions and guards operations.

pub mod claims;
pub mod gateway;
pub mod password;

pub use claims::{ClaimSigner, JwtSigner, Principal, PrincipalKind, SignedClaim};
pub use gateway::{AuthGateway, CustomerSession, ProfileUpdate, Registration, SessionPolicy};
pub use password::{BcryptHasher, PasswordHasher};
