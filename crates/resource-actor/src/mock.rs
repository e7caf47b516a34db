//! # Mock Store & Testing Guide
//!
//! [`MockClient<T>`] hands out a real [`ResourceClient<T>`] whose requests are answered from
//! a queue of expectations instead of a `ResourceActor`. It makes store failures that are
//! hard to provoke for real (a closed actor, a conflict at exactly the wrong moment) trivial
//! to inject.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | | MockClient | Real Actor |
//! |---|---|---|
//! | **State** | none, canned answers | real records |
//! | **Determinism** | total | subject to the scheduler |
//! | **Error injection** | `return_err` | needs contrived state |
//! | **Use case** | logic *around* a client | the actor itself, full system |
//!
//! ## Example
//!
//! ```rust
//! use resource_actor::mock::MockClient;
//! use resource_actor::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Item { id: u32 }
//! #[derive(Debug)] struct ItemCreate;
//! #[derive(Debug)] struct ItemUpdate;
//! #[derive(Debug)] enum ItemAction {}
//! #[derive(Debug, thiserror::Error)] #[error("item error")] struct ItemError;
//!
//! #[async_trait]
//! impl ActorEntity for Item {
//!     type Id = u32; type Create = ItemCreate; type Update = ItemUpdate;
//!     type Action = ItemAction; type ActionResult = (); type Context = (); type Error = ItemError;
//!     fn from_create_params(id: u32, _: ItemCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
//!     async fn on_update(&mut self, _: ItemUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: ItemAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Item>::new();
//!     mock.expect_create().return_ok(7);
//!     mock.expect_get(7).return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert_eq!(client.create(ItemCreate).await.unwrap(), 7);
//!     assert!(matches!(client.get(7).await, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! Expectations are consumed in the order they were registered. A request that does not
//! match the next expectation is dropped unanswered (the caller sees
//! [`FrameworkError::ActorDropped`]) and reported by [`MockClient::verify`].

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// One expected request and the answer to give it.
enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    Update {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    DeleteWhere {
        response: Result<Vec<T::Id>, FrameworkError>,
    },
    Count {
        response: Result<usize, FrameworkError>,
    },
}

struct MockState<T: ActorEntity> {
    expectations: VecDeque<Expectation<T>>,
    mismatches: Vec<String>,
}

type Shared<T> = Arc<Mutex<MockState<T>>>;

fn lock<T: ActorEntity>(state: &Shared<T>) -> MutexGuard<'_, MockState<T>> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A mock store with expectation tracking for fluent testing.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    state: Shared<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a mock with no expectations. Must be called inside a tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let state: Shared<T> = Arc::new(Mutex::new(MockState {
            expectations: VecDeque::new(),
            mismatches: Vec::new(),
        }));
        let task_state = state.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = lock(&task_state).expectations.pop_front();
                if let Some(mismatch) = answer(request, expectation) {
                    lock(&task_state).mismatches.push(mismatch);
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            state,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    fn builder<R>(
        &self,
        wrap: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            state: self.state.clone(),
            wrap: Box::new(wrap),
        }
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |response| Expectation::Get { id, response })
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(|response| Expectation::Create { response })
    }

    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(move |response| Expectation::Update { id, response })
    }

    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(move |response| Expectation::Delete { id, response })
    }

    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(move |response| Expectation::Action { id, response })
    }

    /// Matches both `list` and filtered `find` calls. The canned records are returned as-is;
    /// the filter is not applied.
    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(|response| Expectation::List { response })
    }

    pub fn expect_delete_where(&mut self) -> ExpectationBuilder<T, Vec<T::Id>> {
        self.builder(|response| Expectation::DeleteWhere { response })
    }

    pub fn expect_count(&mut self) -> ExpectationBuilder<T, usize> {
        self.builder(|response| Expectation::Count { response })
    }

    /// Panics if an expectation was left unused or a request did not match.
    pub fn verify(&self) {
        let state = lock(&self.state);
        if !state.mismatches.is_empty() {
            panic!("Unexpected requests: {}", state.mismatches.join("; "));
        }
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }
}

/// Finishes an expectation with the answer the mock should give.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    state: Shared<T>,
    wrap: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    pub fn return_ok(self, value: R) {
        lock(&self.state).expectations.push_back((self.wrap)(Ok(value)));
    }

    pub fn return_err(self, error: FrameworkError) {
        lock(&self.state).expectations.push_back((self.wrap)(Err(error)));
    }
}

/// Answers `request` from `expectation`, or describes why it could not.
fn answer<T: ActorEntity>(
    request: ResourceRequest<T>,
    expectation: Option<Expectation<T>>,
) -> Option<String> {
    fn check_id<I: PartialEq + std::fmt::Display>(op: &str, got: &I, want: &I) -> Option<String> {
        (got != want).then(|| format!("{op} for {got}, expected {want}"))
    }

    match (request, expectation) {
        (ResourceRequest::Get { id, respond_to }, Some(Expectation::Get { id: want, response })) => {
            let mismatch = check_id("get", &id, &want);
            let _ = respond_to.send(response);
            mismatch
        }
        (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
            let _ = respond_to.send(response);
            None
        }
        (
            ResourceRequest::Update { id, respond_to, .. },
            Some(Expectation::Update { id: want, response }),
        ) => {
            let mismatch = check_id("update", &id, &want);
            let _ = respond_to.send(response);
            mismatch
        }
        (
            ResourceRequest::Delete { id, respond_to },
            Some(Expectation::Delete { id: want, response }),
        ) => {
            let mismatch = check_id("delete", &id, &want);
            let _ = respond_to.send(response);
            mismatch
        }
        (
            ResourceRequest::Action { id, respond_to, .. },
            Some(Expectation::Action { id: want, response }),
        ) => {
            let mismatch = check_id("action", &id, &want);
            let _ = respond_to.send(response);
            mismatch
        }
        (ResourceRequest::List { respond_to, .. }, Some(Expectation::List { response })) => {
            let _ = respond_to.send(response);
            None
        }
        (
            ResourceRequest::DeleteWhere { respond_to, .. },
            Some(Expectation::DeleteWhere { response }),
        ) => {
            let _ = respond_to.send(response);
            None
        }
        (ResourceRequest::Count { respond_to }, Some(Expectation::Count { response })) => {
            let _ = respond_to.send(response);
            None
        }
        (request, None) => Some(format!("{} with no expectation left", describe(&request))),
        (request, Some(_)) => Some(format!(
            "{} did not match the next expectation",
            describe(&request)
        )),
    }
}

fn describe<T: ActorEntity>(request: &ResourceRequest<T>) -> &'static str {
    match request {
        ResourceRequest::Create { .. } => "create",
        ResourceRequest::Get { .. } => "get",
        ResourceRequest::Update { .. } => "update",
        ResourceRequest::Delete { .. } => "delete",
        ResourceRequest::Action { .. } => "action",
        ResourceRequest::List { .. } => "list",
        ResourceRequest::DeleteWhere { .. } => "delete_where",
        ResourceRequest::Count { .. } => "count",
    }
}

// =============================================================================
// CHANNEL-LEVEL HELPERS
// =============================================================================

/// Creates a client and the receiving end of its channel.
///
/// Useful when a test wants to inspect the exact request a client sends and answer it by
/// hand, e.g. to hold a response back while something else happens.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Waits for the next request and returns it if it is a Create.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Create,
    tokio::sync::oneshot::Sender<Result<T::Id, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Waits for the next request and returns it if it is an Action.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    tokio::sync::oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Member {
        id: u32,
        email: String,
    }

    #[derive(Debug)]
    struct MemberCreate {
        email: String,
    }

    #[derive(Debug)]
    struct MemberUpdate;

    #[derive(Debug)]
    enum MemberAction {}

    #[derive(Debug, thiserror::Error)]
    #[error("Member error")]
    struct MemberError;

    #[async_trait]
    impl ActorEntity for Member {
        type Id = u32;
        type Create = MemberCreate;
        type Update = MemberUpdate;
        type Action = MemberAction;
        type ActionResult = ();
        type Context = ();
        type Error = MemberError;

        fn from_create_params(id: u32, params: MemberCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                email: params.email,
            })
        }

        async fn on_update(&mut self, _: MemberUpdate, _: &()) -> Result<(), Self::Error> {
            Ok(())
        }

        async fn handle_action(&mut self, _: MemberAction, _: &()) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    fn member(id: u32, email: &str) -> Member {
        Member {
            id,
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn test_channel_level_create() {
        let (client, mut receiver) = create_mock_client::<Member>(10);

        let create_task = tokio::spawn(async move {
            client
                .create(MemberCreate {
                    email: "a@example.com".to_string(),
                })
                .await
        });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.email, "a@example.com");
        responder.send(Ok(1)).unwrap();

        assert_eq!(create_task.await.unwrap().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_expectations_answer_in_order() {
        let mut mock = MockClient::<Member>::new();
        mock.expect_create().return_ok(1);
        mock.expect_list()
            .return_ok(vec![member(1, "a@example.com"), member(2, "b@example.com")]);
        mock.expect_count().return_ok(2);

        let client = mock.client();
        let id = client
            .create(MemberCreate {
                email: "a@example.com".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(id, 1);

        let found = client.find(|m| m.email.starts_with('a')).await.unwrap();
        assert_eq!(found.len(), 2, "mock returns canned records unfiltered");
        assert_eq!(client.count().await.unwrap(), 2);

        mock.verify();
    }

    #[tokio::test]
    async fn test_unexpected_request_is_reported() {
        let mut mock = MockClient::<Member>::new();
        mock.expect_get(1).return_ok(None);

        let client = mock.client();
        let result = client.delete(1).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));

        let verified = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| mock.verify()));
        assert!(verified.is_err());
    }
}
