//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract every record kind implements to be stored by a
//! [`ResourceActor`](crate::ResourceActor). It names the id type, the create and update
//! payloads, the custom actions, the injected context and the error type, and exposes
//! lifecycle hooks (`on_create`, `on_update`, `on_delete`, `handle_action`).
//!
//! # Provided Methods
//! - [`ActorEntity::on_create`] and [`ActorEntity::on_delete`] default to `Ok(())`.
//! - [`ActorEntity::unique_key`] defaults to `None` (no uniqueness constraint).

use async_trait::async_trait;
use std::fmt::{Debug, Display};

/// Trait that any record type must implement to be managed by a `ResourceActor`.
///
/// # Async & Context
/// Hooks are async so they can call other actors. The `Context` associated type is handed
/// to every hook; it is supplied to `run()` rather than `new()`, which lets actors that
/// depend on each other be constructed first and wired afterwards.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Identifier allocated by the actor. Built from a sequential `u32` counter and ordered
    /// so listings come back in insertion order.
    type Id: Eq + Ord + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload required to create a new record.
    type Create: Send + Sync + Debug;

    /// Payload required to update an existing record.
    type Update: Send + Sync + Debug;

    /// Record-specific operations beyond CRUD.
    type Action: Send + Sync + Debug;

    /// Result returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected into the hooks. Use `()` when there are none.
    type Context: Send + Sync;

    /// Error type for validation and hook failures.
    ///
    /// One error type per record kind rather than one per operation: callers match on a
    /// single enum, at the cost of some variants being impossible for some operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Builds the record from its allocated id and the create payload.
    /// Called synchronously before `on_create`; this is where payload validation lives.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Key that must be unique across the collection, if any.
    ///
    /// The actor checks it on create and after every update. A clash is answered with
    /// [`FrameworkError::Conflict`](crate::FrameworkError::Conflict) and nothing is written.
    fn unique_key(&self) -> Option<String> {
        None
    }

    // --- Lifecycle Hooks (Async) ---

    /// Called after the record is built and before it is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies an update payload. Runs against a copy of the stored record, which is only
    /// committed if this returns `Ok` and the unique key still holds.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called before the record is removed. Returning an error keeps the record.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handles a record-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
