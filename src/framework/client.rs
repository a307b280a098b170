//! # Generic Client
//!
//! The client half of a store. It forwards requests over a tokio mpsc channel and waits for
//! the reply on a oneshot channel, bounded by a per-client timeout.

use super::entity::ActorEntity;
use super::error::FrameworkError;
use super::message::ResourceRequest;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// A type-safe client for interacting with a `ResourceActor`.
///
/// * **Cloneable** – holds only a sender, so cloning is inexpensive.
/// * **Bounded** – a request that is not queued and answered within the timeout yields
///   [`FrameworkError::Timeout`].
#[derive(Clone)]
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
    timeout: Duration,
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self {
            sender,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn request<R>(
        &self,
        request: ResourceRequest<T>,
        response: oneshot::Receiver<Result<R, FrameworkError>>,
    ) -> Result<R, FrameworkError> {
        // The timeout covers queueing as well, so a full queue cannot block forever.
        let exchange = async {
            self.sender
                .send(request)
                .await
                .map_err(|_| FrameworkError::ActorClosed)?;
            response.await.map_err(|_| FrameworkError::ActorDropped)?
        };
        match tokio::time::timeout(self.timeout, exchange).await {
            Ok(reply) => reply,
            Err(_) => Err(FrameworkError::Timeout(self.timeout)),
        }
    }

    pub async fn insert(&self, entity: T) -> Result<T::Id, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.request(ResourceRequest::Insert { entity, respond_to }, response)
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.request(ResourceRequest::Get { id, respond_to }, response)
            .await
    }

    pub async fn find(&self, query: T::Query) -> Result<Option<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.request(ResourceRequest::Find { query, respond_to }, response)
            .await
    }

    pub async fn find_all(&self, query: T::Query) -> Result<Vec<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.request(ResourceRequest::FindAll { query, respond_to }, response)
            .await
    }

    pub async fn find_or_create(
        &self,
        query: T::Query,
        params: T::Create,
    ) -> Result<T, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.request(
            ResourceRequest::FindOrCreate {
                query,
                params,
                respond_to,
            },
            response,
        )
        .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.request(
            ResourceRequest::Action {
                id,
                action,
                respond_to,
            },
            response,
        )
        .await
    }
}
