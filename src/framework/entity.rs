//! # ActorEntity Trait
//!
//! The contract a record type implements to be stored by a [`ResourceActor`](super::ResourceActor).
//! Associated types pin down the id, the creation payload, the query language and the custom
//! actions for each store, so a channel query can never be sent to the user store.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any stored record must implement to be managed by `ResourceActor`.
///
/// # Async & Context
/// Hooks are `#[async_trait]` so they can await other stores. The `Context` type is injected
/// into every hook when the actor is started with `run(context)`.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Unique identifier of a record.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// Payload used by find-or-create to build a new record.
    type Create: Send + Sync + Debug;

    /// Predicate language for `find` / `find_all` / `find_or_create`.
    type Query: Send + Sync + Debug;

    /// Record-specific mutations (e.g. suspending a user).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected into the actor. Use `()` if none are needed.
    type Context: Send + Sync;

    /// The error type for this record.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Identifier of this record.
    fn id(&self) -> &Self::Id;

    /// Generate a fresh identifier for a record built by find-or-create.
    fn new_id() -> Self::Id;

    /// Construct the full record from a freshly generated id and the payload.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Whether this record satisfies `query`.
    fn matches(&self, query: &Self::Query) -> bool;

    /// Called after a record is built, before it is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handle a custom record-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
