//! # Product Actor
//!
//! Keeps products. Deleting a product does not touch its schemes; readers render a
//! missing product as unavailable.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::ProductClient;
use crate::model::Product;
use resource_actor::ResourceActor;

/// Creates the Product actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Product>, ProductClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, ProductClient::new(generic_client))
}
