//! # Generic Actor Server
//!
//! The `ResourceActor` owns one collection of records and processes requests for it
//! sequentially. It is the "server" half of the store; [`ResourceClient`] is the other.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{Filter, ResourceRequest};
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of records.
///
/// **Concurrency model**: each actor drains its channel one message at a time, so the
/// `store` needs no lock. Many actors run side by side on the runtime.
///
/// **Uniqueness**: because this task is the only writer for its collection, checking an
/// entity's [`unique_key`](ActorEntity::unique_key) and inserting happen without any
/// interleaving. Two racing registrations for the same key resolve to one `Ok` and one
/// [`FrameworkError::Conflict`].
///
/// # Usage Pattern
///
/// 1. **Create**: `ResourceActor::new()` returns the actor and its client.
/// 2. **Wire**: pass dependencies (other clients) into `actor.run(context)`.
/// 3. **Run**: spawn the run loop on a tokio task.
///
/// ```rust
/// use resource_actor::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Tag { id: u32, label: String }
/// #[derive(Debug)] struct TagCreate(String);
/// #[derive(Debug)] struct TagUpdate;
/// #[derive(Debug)] enum TagAction {}
/// #[derive(Debug)] struct TagError;
///
/// impl std::fmt::Display for TagError {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str("tag error") }
/// }
/// impl std::error::Error for TagError {}
///
/// #[async_trait]
/// impl ActorEntity for Tag {
///     type Id = u32;
///     type Create = TagCreate;
///     type Update = TagUpdate;
///     type Action = TagAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = TagError;
///
///     fn from_create_params(id: u32, params: TagCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, label: params.0 })
///     }
///     fn unique_key(&self) -> Option<String> { Some(self.label.clone()) }
///     async fn on_update(&mut self, _: TagUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, _: TagAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Tag>::new(10);
///     tokio::spawn(actor.run(()));
///
///     client.create(TagCreate("rust".into())).await.unwrap();
///     assert!(client.create(TagCreate("rust".into())).await.is_err());
/// }
/// ```
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the request channel; when it is full, client calls
    /// wait for room.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Returns the id of another record already holding `key`.
    fn key_holder(&self, key: &str, except: Option<&T::Id>) -> Option<&T::Id> {
        self.store
            .iter()
            .filter(|(id, _)| Some(*id) != except)
            .find(|(_, item)| item.unique_key().as_deref() == Some(key))
            .map(|(id, _)| id)
    }

    /// Runs the actor's event loop until every client has been dropped.
    ///
    /// # Context Injection
    /// `context` is handed to every entity hook. It is supplied here rather than in `new()`
    /// so actors can be created first and wired to each other afterwards.
    pub async fn run(mut self, context: T::Context) {
        // Just the type name, e.g. "Area" instead of "storefront::model::area::Area"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);

                    let mut item = match T::from_create_params(id.clone(), params) {
                        Ok(item) => item,
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                    };
                    if let Err(e) = item.on_create(&context).await {
                        warn!(entity_type, error = %e, "on_create failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    if let Some(key) = item.unique_key() {
                        if let Some(holder) = self.key_holder(&key, None) {
                            warn!(entity_type, %holder, "Unique key taken");
                            let _ = respond_to.send(Err(FrameworkError::Conflict(key)));
                            continue;
                        }
                    }

                    self.next_id += 1;
                    self.store.insert(id.clone(), item);
                    info!(entity_type, %id, size = self.store.len(), "Created");
                    let _ = respond_to.send(Ok(id));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(mut candidate) = self.store.get(&id).cloned() else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = candidate.on_update(update, &context).await {
                        warn!(entity_type, %id, error = %e, "Update failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    if let Some(key) = candidate.unique_key() {
                        if self.key_holder(&key, Some(&id)).is_some() {
                            warn!(entity_type, %id, "Unique key taken");
                            let _ = respond_to.send(Err(FrameworkError::Conflict(key)));
                            continue;
                        }
                    }
                    self.store.insert(id.clone(), candidate.clone());
                    info!(entity_type, %id, "Updated");
                    let _ = respond_to.send(Ok(candidate));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    if let Some(item) = self.store.get(&id) {
                        if let Err(e) = item.on_delete(&context).await {
                            warn!(entity_type, %id, error = %e, "on_delete failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        self.store.remove(&id);
                        info!(entity_type, %id, size = self.store.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    if let Some(item) = self.store.get_mut(&id) {
                        let result = item
                            .handle_action(action, &context)
                            .await
                            .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                        match &result {
                            Ok(_) => info!(entity_type, %id, "Action ok"),
                            Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                        }
                        let _ = respond_to.send(result);
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::List { filter, respond_to } => {
                    let items: Vec<T> = self
                        .store
                        .values()
                        .filter(|item| filter.as_ref().map_or(true, |f| f.matches(item)))
                        .cloned()
                        .collect();
                    debug!(entity_type, filtered = filter.is_some(), count = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::DeleteWhere { filter, respond_to } => {
                    let removed = self.delete_where(&filter, &context, entity_type).await;
                    info!(entity_type, removed = removed.len(), size = self.store.len(), "Deleted matching");
                    let _ = respond_to.send(Ok(removed));
                }
                ResourceRequest::Count { respond_to } => {
                    debug!(entity_type, size = self.store.len(), "Count");
                    let _ = respond_to.send(Ok(self.store.len()));
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    /// Removes every record matching `filter` whose `on_delete` hook agrees.
    async fn delete_where(
        &mut self,
        filter: &Filter<T>,
        context: &T::Context,
        entity_type: &str,
    ) -> Vec<T::Id> {
        let matching: Vec<T::Id> = self
            .store
            .iter()
            .filter(|(_, item)| filter.matches(item))
            .map(|(id, _)| id.clone())
            .collect();

        let mut removed = Vec::with_capacity(matching.len());
        for id in matching {
            let Some(item) = self.store.get(&id) else {
                continue;
            };
            if let Err(e) = item.on_delete(context).await {
                warn!(entity_type, %id, error = %e, "on_delete failed, record kept");
                continue;
            }
            self.store.remove(&id);
            removed.push(id);
        }
        removed
    }
}
