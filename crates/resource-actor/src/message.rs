//! # Generic Messages
//!
//! Message types exchanged between `ResourceClient` and `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use std::fmt;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Predicate evaluated inside the actor task to narrow a query.
pub struct Filter<T>(Box<dyn Fn(&T) -> bool + Send + Sync>);

impl<T> Filter<T> {
    pub fn new(predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self(Box::new(predicate))
    }

    pub fn matches(&self, item: &T) -> bool {
        (self.0)(item)
    }
}

impl<T> fmt::Debug for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Filter(..)")
    }
}

/// Request sent to a `ResourceActor`.
///
/// # Resource-Oriented Architecture
/// Instead of ad-hoc messages per operation, every collection speaks the same set of
/// lifecycle operations:
///
/// - **Create**: builds a record from [`ActorEntity::Create`] and returns its new id.
/// - **Get**: fetches one record by id.
/// - **Update**: applies [`ActorEntity::Update`] and returns the committed record.
/// - **Delete**: removes one record by id.
/// - **Action**: runs a custom [`ActorEntity::Action`].
/// - **List**: returns all records, or those matching a [`Filter`], in id order.
/// - **DeleteWhere**: removes every record matching a [`Filter`], returning their ids.
/// - **Count**: number of records held.
///
/// The enum is generic over `T: ActorEntity`, so a payload for one collection cannot be
/// sent to another.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    List {
        filter: Option<Filter<T>>,
        respond_to: Response<Vec<T>>,
    },
    DeleteWhere {
        filter: Filter<T>,
        respond_to: Response<Vec<T::Id>>,
    },
    Count {
        respond_to: Response<usize>,
    },
}
