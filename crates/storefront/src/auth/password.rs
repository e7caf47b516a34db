//! One-way password hashing.

use crate::error::StoreError;
use crate::model::PasswordHash;
use async_trait::async_trait;

/// Salted one-way hash with verification.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &str) -> Result<PasswordHash, StoreError>;

    /// `Ok(false)` on a wrong password; `Err` only when the backend itself fails.
    async fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, StoreError>;
}

/// bcrypt on the blocking thread pool.
#[derive(Debug, Clone)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

#[async_trait]
impl PasswordHasher for BcryptHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, StoreError> {
        let password = password.to_string();
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| StoreError::Crypto(e.to_string()))?
            .map(PasswordHash)
            .map_err(|e| StoreError::Crypto(e.to_string()))
    }

    async fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, StoreError> {
        let password = password.to_string();
        let hash = hash.as_str().to_string();
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| StoreError::Crypto(e.to_string()))?
            .map_err(|e| StoreError::Crypto(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hasher = BcryptHasher::new(4);
        let hash = hasher.hash("password").await.unwrap();
        assert_ne!(hash.as_str(), "password");
        assert!(hasher.verify("password", &hash).await.unwrap());
        assert!(!hasher.verify("Password", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_hashes_are_salted() {
        let hasher = BcryptHasher::new(4);
        let a = hasher.hash("password").await.unwrap();
        let b = hasher.hash("password").await.unwrap();
        assert_ne!(a, b);
    }
}
