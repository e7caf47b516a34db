//! # Scheme Actor
//!
//! Keeps schemes (area x product x price x offer). It has no dependencies; checking
//! that the area and product exist happens in the
//! [`SchemeResolver`](crate::catalog::SchemeResolver) before the create is sent, which
//! keeps the Area -> Scheme dependency one-way.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::SchemeClient;
use crate::model::Scheme;
use resource_actor::ResourceActor;

/// Creates the Scheme actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Scheme>, SchemeClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, SchemeClient::new(generic_client))
}
