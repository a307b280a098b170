//! # User Client
//!
//! Provides a high-level API for interacting with the user store.
use crate::error::{Error, Result};
use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{SuspensionDuration, User, UserId, UserQuery};
use crate::user_actor::{UserAction, UserActionResult};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl UserClient {
    pub fn new(inner: ResourceClient<User>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<User> for UserClient {
    type Error = Error;

    fn inner(&self) -> &ResourceClient<User> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        Error::from_framework(e, "users")
    }
}

impl UserClient {
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn insert_user(&self, user: User) -> Result<UserId> {
        debug!(?user, "insert_user called");
        self.inner.insert(user).await.map_err(Self::map_error)
    }

    /// Fetch a user by id; a missing user is `NotFound`.
    pub async fn fetch_user(&self, id: &str) -> Result<User> {
        if id.is_empty() {
            return Err(create_error!(InvalidProperty));
        }
        self.get(id.to_string())
            .await?
            .ok_or_else(|| create_error!(NotFound))
    }

    /// Fetch a user by username (any case) and exact discriminator.
    #[instrument(skip(self))]
    pub async fn fetch_user_by_username(&self, username: &str, discriminator: &str) -> Result<User> {
        if username.is_empty() || discriminator.is_empty() {
            return Err(create_error!(InvalidProperty));
        }
        debug!("Sending request");
        self.inner
            .find(UserQuery::ByUsername {
                username: username.to_string(),
                discriminator: discriminator.to_string(),
            })
            .await
            .map_err(Self::map_error)?
            .ok_or_else(|| create_error!(NotFound))
    }

    #[instrument(skip(self, reasons))]
    pub async fn suspend(
        &self,
        id: UserId,
        duration: SuspensionDuration,
        reasons: Vec<String>,
    ) -> Result<User> {
        debug!(?reasons, "Sending request");
        let UserActionResult::Suspend(user) = self
            .inner
            .perform_action(id, UserAction::Suspend { duration, reasons })
            .await
            .map_err(Self::map_error)?;
        Ok(user)
    }
}
