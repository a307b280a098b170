//! # Channel Store
//!
//! The channel store actor. Direct channels are only ever created through find-or-create,
//! which the actor handles in one step, so the same pair of users always ends up with the
//! same channel.

pub mod entity;

use crate::clients::ChannelClient;
use crate::config::BindingConfig;
use crate::framework::ResourceActor;
use crate::model::Channel;

/// Creates a new Channel actor and its client.
pub fn new(config: &BindingConfig) -> (ResourceActor<Channel>, ChannelClient) {
    let (actor, generic_client) =
        ResourceActor::new(config.channel_buffer, config.request_timeout);
    let client = ChannelClient::new(generic_client);

    (actor, client)
}
