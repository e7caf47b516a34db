//! # Resource Actor
//!
//! A collection-scoped record store built on the actor model. Each collection (areas,
//! products, orders, ...) is owned by one [`ResourceActor`] running on its own tokio task.
//! Callers talk to it through a cheap, cloneable [`ResourceClient`].
//!
//! ## Core Concepts
//!
//! - **[`ActorEntity`]**: the contract a record type implements. Associated types pin the
//!   id, the create/update payloads, custom actions and the injected context.
//! - **[`ResourceActor`]**: the single writer for its collection. Requests are processed one
//!   at a time, so "check the unique key, then insert" can never race.
//! - **[`ResourceClient`]**: async CRUD + query API over the actor's channel.
//! - **[`ActorClient`]**: trait that domain clients implement to inherit `get`, `delete`,
//!   `list` and `count` with their own error type.
//!
//! ## Queries
//!
//! Besides CRUD the actor answers `List` (optionally narrowed by a [`Filter`]), `DeleteWhere`
//! (bulk removal by predicate) and `Count`. Filters are plain closures evaluated inside the
//! actor task, which is enough for equality and foreign-key lookups.
//!
//! ## Testing
//!
//! See [`mock`] for a [`MockClient`](mock::MockClient) that answers requests from a queue
//! of expectations instead of a real store.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{Filter, ResourceRequest, Response};
