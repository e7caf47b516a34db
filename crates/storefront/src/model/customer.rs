use crate::model::{record_id, PasswordHash};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

record_id!(
    /// Identifier of a [`Customer`].
    CustomerId,
    "customer"
);

/// A self-registered shopper.
///
/// # Actor Framework
/// Implements [`ActorEntity`](resource_actor::ActorEntity) in
/// [`customer_actor`](crate::customer_actor). The normalized email is the collection's
/// unique key, so two racing registrations cannot both succeed.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: CustomerId,
    pub username: String,
    pub email: String,
    pub password_hash: PasswordHash,
    pub mobile: String,
    pub address: String,
    /// Free-text area name, not a reference.
    pub area: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Payload for registering a customer.
#[derive(Debug, Clone)]
pub struct CustomerCreate {
    pub username: String,
    pub email: String,
    pub password_hash: PasswordHash,
    pub mobile: String,
    pub address: String,
    pub area: Option<String>,
}

/// Profile changes. `None` leaves a field as it is.
#[derive(Debug, Clone, Default)]
pub struct CustomerUpdate {
    pub username: Option<String>,
    pub address: Option<String>,
    pub area: Option<String>,
    pub password_hash: Option<PasswordHash>,
}

/// What a customer record looks like to clients: everything but the hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerView {
    pub id: CustomerId,
    pub username: String,
    pub email: String,
    pub mobile: String,
    pub address: String,
    pub area: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Lookup form of an email address.
    pub fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }

    pub fn view(&self) -> CustomerView {
        CustomerView {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            mobile: self.mobile.clone(),
            address: self.address.clone(),
            area: self.area.clone(),
            created_at: self.created_at,
        }
    }
}
