//! # User Store
//!
//! The user store actor. Users are inserted whole (with their own id) and looked up by id or
//! by username and discriminator. The only mutation is [`UserAction::Suspend`].
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`User`]
//! - [`actions`] - [`UserAction`] and [`UserActionResult`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust,ignore
//! let (actor, client) = user_actor::new(&BindingConfig::default());
//! tokio::spawn(actor.run(()));
//!
//! client.insert_user(User::new("01A", "dos", "7624")).await?;
//! let user = client.fetch_user_by_username("DOS", "7624").await?;
//! ```

pub mod actions;
pub mod entity;

pub use actions::*;

use crate::clients::UserClient;
use crate::config::BindingConfig;
use crate::framework::ResourceActor;
use crate::model::User;

/// Creates a new User actor and its client.
pub fn new(config: &BindingConfig) -> (ResourceActor<User>, UserClient) {
    let (actor, generic_client) =
        ResourceActor::new(config.channel_buffer, config.request_timeout);
    let client = UserClient::new(generic_client);

    (actor, client)
}
