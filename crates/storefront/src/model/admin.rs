use crate::model::{record_id, PasswordHash};

record_id!(
    /// Identifier of an [`Administrator`].
    AdminId,
    "admin"
);

/// A dashboard operator. Created by the seed or by another administrator, never deleted.
///
/// # Actor Framework
/// Implements [`ActorEntity`](resource_actor::ActorEntity) in
/// [`admin_actor`](crate::admin_actor); the username is the collection's unique key.
#[derive(Debug, Clone, PartialEq)]
pub struct Administrator {
    pub id: AdminId,
    pub username: String,
    pub password_hash: PasswordHash,
}

/// Payload for creating an administrator. The password arrives already hashed.
#[derive(Debug, Clone)]
pub struct AdministratorCreate {
    pub username: String,
    pub password_hash: PasswordHash,
}
