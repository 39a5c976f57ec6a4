//! # Generic Messages
//!
//! Message types exchanged between a `ResourceClient` and its `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::query::Query;
use crate::subscription::Subscription;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Request sent to a collection actor.
///
/// # Resource-Oriented Architecture
/// Every collection speaks the same small vocabulary instead of ad-hoc messages:
///
/// - **Create**: insert with a generated id, from [`ActorEntity::Create`].
/// - **Get**: point read by id.
/// - **Update**: point update by id, merging [`ActorEntity::Update`].
/// - **Delete**: point delete by id.
/// - **Action**: a document-specific [`ActorEntity::Action`].
/// - **Query**: collection scan with a filter and a sort key.
/// - **Subscribe**: the live variant of `Query`.
///
/// The enum is generic over `T: ActorEntity`, so a `Product` payload can never reach the
/// `Order` collection.
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
    Query {
        query: Query<T>,
        respond_to: Response<Vec<T>>,
    },
    Subscribe {
        query: Query<T>,
        respond_to: Response<Subscription<T>>,
    },
}
