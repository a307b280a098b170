//! # Channel Client
use crate::error::{Error, Result};
use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{Channel, ChannelCreate, ChannelQuery, UserId};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Channel actor.
#[derive(Clone)]
pub struct ChannelClient {
    inner: ResourceClient<Channel>,
}

impl ChannelClient {
    pub fn new(inner: ResourceClient<Channel>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Channel> for ChannelClient {
    type Error = Error;

    fn inner(&self) -> &ResourceClient<Channel> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        Error::from_framework(e, "channels")
    }
}

impl ChannelClient {
    /// Return the direct channel between two users, creating it on first use.
    #[instrument(skip(self))]
    pub async fn find_or_create_dm(&self, user_a: &str, user_b: &str) -> Result<Channel> {
        debug!("Sending request");
        self.inner
            .find_or_create(
                ChannelQuery::DirectMessage {
                    user_a: user_a.to_string(),
                    user_b: user_b.to_string(),
                },
                ChannelCreate {
                    user_a: user_a.to_string(),
                    user_b: user_b.to_string(),
                },
            )
            .await
            .map_err(Self::map_error)
    }

    /// Every direct channel `user` takes part in.
    #[instrument(skip(self))]
    pub async fn find_direct_messages(&self, user: UserId) -> Result<Vec<Channel>> {
        self.inner
            .find_all(ChannelQuery::Participant(user))
            .await
            .map_err(Self::map_error)
    }
}
