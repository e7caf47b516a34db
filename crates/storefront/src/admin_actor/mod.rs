//! # Administrator Actor
//!
//! Keeps dashboard operators. No dependencies (Context = `()`), no custom actions, and
//! no updates. The username is the unique key.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::AdminClient;
use crate::model::Administrator;
use resource_actor::ResourceActor;

/// Creates the Administrator actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Administrator>, AdminClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, AdminClient::new(generic_client))
}
