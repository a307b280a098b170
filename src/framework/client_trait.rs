//! # ActorClient Trait
//!
//! Common interface for the typed store clients: access to the inner `ResourceClient`, a
//! mapping from framework errors to the client's error type, and a default `get`.
use super::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for store-specific clients to inherit standard operations.
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The store-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch a record by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }
}
