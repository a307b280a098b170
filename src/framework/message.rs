//! # Generic Messages
//!
//! Requests sent from a [`ResourceClient`](super::ResourceClient) to its
//! [`ResourceActor`](super::ResourceActor). Every request carries a oneshot sender for the reply.

use super::entity::ActorEntity;
use super::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// - **Insert**: store a fully-formed record under its own id; fails if the id is taken.
/// - **Get**: fetch a record by id.
/// - **Find** / **FindAll**: first / every record matching a query.
/// - **FindOrCreate**: return the first match, or build one from `params`. The actor handles
///   this in a single step, so two concurrent callers cannot both create.
/// - **Action**: run an [`ActorEntity::Action`] against one record.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Insert {
        entity: T,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Find {
        query: T::Query,
        respond_to: Response<Option<T>>,
    },
    FindAll {
        query: T::Query,
        respond_to: Response<Vec<T>>,
    },
    FindOrCreate {
        query: T::Query,
        params: T::Create,
        respond_to: Response<T>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
