//! # Area Actor
//!
//! Keeps delivery areas. Depends on the Scheme actor: its context is a
//! [`SchemeClient`](crate::clients::SchemeClient), used by `on_delete` to purge every
//! scheme of the area before the area itself goes away. The Scheme actor never calls
//! back, so the dependency graph stays acyclic and shutdown by channel closure works.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::AreaClient;
use crate::model::Area;
use resource_actor::ResourceActor;

/// Creates the Area actor and its client. Run it with a `SchemeClient` as context.
pub fn new(buffer_size: usize) -> (ResourceActor<Area>, AreaClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, AreaClient::new(generic_client))
}
