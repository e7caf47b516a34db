//! # Auth Gateway
//!
//! Issues sessions for administrators and customers and guards every protected
//! operation. Credentials failures are answered with one generic
//! [`AuthError::InvalidCredentials`] whether the account is unknown or the password is
//! wrong. An unknown account still costs one password check, against a decoy hash, so
//! the answer takes as long either way.

use super::claims::{ClaimSigner, Principal, PrincipalKind, SignedClaim};
use super::password::PasswordHasher;
use crate::clients::{AdminClient, CustomerClient};
use crate::error::{require, AuthError, ServiceError};
use crate::model::{
    AdminId, AdministratorCreate, CustomerCreate, CustomerId, CustomerUpdate, CustomerView, PasswordHash,
};
use resource_actor::ActorClient;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument, warn};

/// Self-registration form.
#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub area: Option<String>,
}

/// Profile changes a customer may make. Blank passwords are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub address: Option<String>,
    pub area: Option<String>,
    pub password: Option<String>,
}

/// A signed-in customer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerSession {
    pub token: SignedClaim,
    pub customer: CustomerView,
}

/// Session lifetimes.
#[derive(Debug, Clone, Copy)]
pub struct SessionPolicy {
    pub admin_ttl: chrono::Duration,
    pub customer_ttl: chrono::Duration,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            admin_ttl: chrono::Duration::hours(10),
            customer_ttl: chrono::Duration::hours(100),
        }
    }
}

#[derive(Clone)]
pub struct AuthGateway {
    admins: AdminClient,
    customers: CustomerClient,
    hasher: Arc<dyn PasswordHasher>,
    signer: Arc<dyn ClaimSigner>,
    policy: SessionPolicy,
    decoy: Arc<OnceCell<PasswordHash>>,
}

const DECOY_PASSWORD: &str = "no-such-account";

impl AuthGateway {
    pub fn new(
        admins: AdminClient,
        customers: CustomerClient,
        hasher: Arc<dyn PasswordHasher>,
        signer: Arc<dyn ClaimSigner>,
        policy: SessionPolicy,
    ) -> Self {
        Self {
            admins,
            customers,
            hasher,
            signer,
            policy,
            decoy: Arc::new(OnceCell::new()),
        }
    }

    // --- Guards ---

    /// Opens `token` and checks it speaks for the expected kind of principal.
    ///
    /// A well-signed claim of the other kind is rejected as [`AuthError::InvalidToken`].
    pub fn verify(&self, token: Option<&str>, expected: PrincipalKind) -> Result<Principal, AuthError> {
        let token = token.map(str::trim).filter(|t| !t.is_empty()).ok_or(AuthError::MissingToken)?;
        let principal = self.signer.open(token)?;
        if principal.kind() != expected {
            warn!(?expected, actual = ?principal.kind(), "Claim of the wrong kind");
            return Err(AuthError::InvalidToken);
        }
        Ok(principal)
    }

    pub fn require_admin(&self, token: Option<&str>) -> Result<AdminId, AuthError> {
        match self.verify(token, PrincipalKind::Administrator)? {
            Principal::Administrator(id) => Ok(id),
            Principal::Customer(_) => Err(AuthError::InvalidToken),
        }
    }

    pub fn require_customer(&self, token: Option<&str>) -> Result<CustomerId, AuthError> {
        match self.verify(token, PrincipalKind::Customer)? {
            Principal::Customer(id) => Ok(id),
            Principal::Administrator(_) => Err(AuthError::InvalidToken),
        }
    }

    /// The customer behind `token`, if there is a valid one. Anything else means guest.
    pub fn optional_customer(&self, token: Option<&str>) -> Option<CustomerId> {
        token?;
        match self.require_customer(token) {
            Ok(id) => Some(id),
            Err(e) => {
                debug!(error = %e, "Ignoring customer claim");
                None
            }
        }
    }

    // --- Sessions ---

    /// Burns one password check for a login whose account does not exist.
    async fn check_decoy(&self, password: &str) -> Result<(), ServiceError> {
        let decoy = self
            .decoy
            .get_or_try_init(|| self.hasher.hash(DECOY_PASSWORD))
            .await?;
        self.hasher.verify(password, decoy).await?;
        Ok(())
    }

    #[instrument(skip(self, password))]
    pub async fn issue_admin_session(&self, username: &str, password: &str) -> Result<SignedClaim, ServiceError> {
        let Some(admin) = self.admins.find_by_username(username).await? else {
            info!("Unknown administrator");
            self.check_decoy(password).await?;
            return Err(AuthError::InvalidCredentials.into());
        };
        if !self.hasher.verify(password, &admin.password_hash).await? {
            info!(admin_id = %admin.id, "Wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = self
            .signer
            .sign(Principal::Administrator(admin.id), self.policy.admin_ttl)?;
        info!(admin_id = %admin.id, "Administrator signed in");
        Ok(token)
    }

    #[instrument(skip(self, password))]
    pub async fn issue_customer_session(&self, email: &str, password: &str) -> Result<CustomerSession, ServiceError> {
        let Some(customer) = self.customers.find_by_email(email).await? else {
            info!("Unknown customer");
            self.check_decoy(password).await?;
            return Err(AuthError::InvalidCredentials.into());
        };
        if !self.hasher.verify(password, &customer.password_hash).await? {
            info!(customer_id = %customer.id, "Wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = self
            .signer
            .sign(Principal::Customer(customer.id), self.policy.customer_ttl)?;
        info!(customer_id = %customer.id, "Customer signed in");
        Ok(CustomerSession {
            token,
            customer: customer.view(),
        })
    }

    /// Registers a customer and signs them in.
    ///
    /// The early email lookup only saves a hash; the Customer actor's unique key is what
    /// actually decides a race between two registrations.
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub async fn register_customer(&self, form: Registration) -> Result<CustomerSession, ServiceError> {
        require("username", &form.username)?;
        require("email", &form.email)?;
        require("password", &form.password)?;

        if self.customers.find_by_email(&form.email).await?.is_some() {
            info!("Email already registered");
            return Err(AuthError::AlreadyExists("Customer".into()).into());
        }

        let password_hash = self.hasher.hash(&form.password).await?;
        let id = self
            .customers
            .register(CustomerCreate {
                username: form.username,
                email: form.email,
                password_hash,
                mobile: form.mobile,
                address: form.address,
                area: form.area,
            })
            .await?;

        let customer = self
            .customers
            .get(id)
            .await?
            .ok_or_else(|| ServiceError::unavailable(format!("{id} vanished after registration")))?;
        let token = self.signer.sign(Principal::Customer(id), self.policy.customer_ttl)?;
        info!(customer_id = %id, "Customer registered");
        Ok(CustomerSession {
            token,
            customer: customer.view(),
        })
    }

    /// Creates another administrator. The caller must hold a claim for an administrator
    /// that still exists.
    #[instrument(skip(self, token, password))]
    pub async fn create_administrator(
        &self,
        token: Option<&str>,
        username: &str,
        password: &str,
    ) -> Result<AdminId, ServiceError> {
        let actor = self.require_admin(token)?;
        if self.admins.get(actor).await?.is_none() {
            warn!(admin_id = %actor, "Claim for an unknown administrator");
            return Err(AuthError::NotAuthorized.into());
        }
        require("username", username)?;
        require("password", password)?;

        let password_hash = self.hasher.hash(password).await?;
        let id = self
            .admins
            .create_admin(AdministratorCreate {
                username: username.to_string(),
                password_hash,
            })
            .await?;
        info!(created_by = %actor, admin_id = %id, "Administrator created");
        Ok(id)
    }

    /// Seeds an administrator without a claim. Used by the bootstrap only.
    pub(crate) async fn bootstrap_administrator(&self, username: &str, password: &str) -> Result<AdminId, ServiceError> {
        let password_hash = self.hasher.hash(password).await?;
        Ok(self
            .admins
            .create_admin(AdministratorCreate {
                username: username.to_string(),
                password_hash,
            })
            .await?)
    }

    // --- Customer self-service ---

    #[instrument(skip(self, token, update))]
    pub async fn update_profile(&self, token: Option<&str>, update: ProfileUpdate) -> Result<CustomerView, ServiceError> {
        let id = self.require_customer(token)?;

        let password_hash = match update.password.filter(|p| !p.is_empty()) {
            Some(password) => Some(self.hasher.hash(&password).await?),
            None => None,
        };
        if let Some(username) = &update.username {
            require("username", username)?;
        }

        let customer = self
            .customers
            .update_profile(
                id,
                CustomerUpdate {
                    username: update.username,
                    address: update.address,
                    area: update.area,
                    password_hash,
                },
            )
            .await?;
        info!(customer_id = %id, "Profile updated");
        Ok(customer.view())
    }

    pub async fn customer_count(&self, token: Option<&str>) -> Result<usize, ServiceError> {
        self.require_admin(token)?;
        Ok(self.customers.count().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::JwtSigner;
    use crate::error::StoreError;
    use crate::model::{Administrator, Customer};
    use async_trait::async_trait;
    use resource_actor::mock::MockClient;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Plain-text "hashes" that count how often a password is checked.
    #[derive(Default)]
    struct CountingHasher {
        hashes: AtomicUsize,
        verifies: AtomicUsize,
    }

    #[async_trait]
    impl PasswordHasher for CountingHasher {
        async fn hash(&self, password: &str) -> Result<PasswordHash, StoreError> {
            self.hashes.fetch_add(1, Ordering::SeqCst);
            Ok(PasswordHash(format!("plain:{password}")))
        }

        async fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, StoreError> {
            self.verifies.fetch_add(1, Ordering::SeqCst);
            Ok(hash.as_str() == format!("plain:{password}"))
        }
    }

    struct Fixture {
        admins: MockClient<Administrator>,
        customers: MockClient<Customer>,
        hasher: Arc<CountingHasher>,
        gateway: AuthGateway,
    }

    fn fixture() -> Fixture {
        let admins = MockClient::<Administrator>::new();
        let customers = MockClient::<Customer>::new();
        let hasher = Arc::new(CountingHasher::default());
        let gateway = AuthGateway::new(
            AdminClient::new(admins.client()),
            CustomerClient::new(customers.client()),
            hasher.clone(),
            Arc::new(JwtSigner::new("gateway-test-secret")),
            SessionPolicy::default(),
        );
        Fixture {
            admins,
            customers,
            hasher,
            gateway,
        }
    }

    #[tokio::test]
    async fn test_unknown_account_costs_a_password_check() {
        let mut f = fixture();
        f.admins.expect_list().return_ok(vec![]);
        f.admins.expect_list().return_ok(vec![Administrator {
            id: AdminId::from(1),
            username: "admin".into(),
            password_hash: PasswordHash("plain:password".into()),
        }]);
        f.customers.expect_list().return_ok(vec![]);

        let unknown = f.gateway.issue_admin_session("nobody", "password").await;
        assert_eq!(unknown, Err(ServiceError::Auth(AuthError::InvalidCredentials)));
        assert_eq!(f.hasher.verifies.load(Ordering::SeqCst), 1);

        let wrong = f.gateway.issue_admin_session("admin", "guess").await;
        assert_eq!(wrong, Err(ServiceError::Auth(AuthError::InvalidCredentials)));
        assert_eq!(f.hasher.verifies.load(Ordering::SeqCst), 2);

        let unknown = f.gateway.issue_customer_session("nobody@example.com", "password").await;
        assert_eq!(unknown, Err(ServiceError::Auth(AuthError::InvalidCredentials)));
        assert_eq!(f.hasher.verifies.load(Ordering::SeqCst), 3);

        // The decoy hash is made once and reused.
        assert_eq!(f.hasher.hashes.load(Ordering::SeqCst), 1);
        f.admins.verify();
        f.customers.verify();
    }
}
