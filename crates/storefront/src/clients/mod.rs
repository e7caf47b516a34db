//! # Clients
//!
//! Typed wrappers around each collection's [`ResourceClient`](resource_actor::ResourceClient).
//! They implement [`ActorClient`](resource_actor::ActorClient) for `get`, `delete`, `list`
//! and `count`, and add the lookups the services need, with errors already in the
//! actor's own error type.

pub mod admin_client;
pub mod area_client;
pub mod customer_client;
pub mod order_client;
pub mod product_client;
pub mod scheme_client;

pub use admin_client::AdminClient;
pub use area_client::AreaClient;
pub use customer_client::CustomerClient;
pub use order_client::OrderClient;
pub use product_client::ProductClient;
pub use scheme_client::SchemeClient;
