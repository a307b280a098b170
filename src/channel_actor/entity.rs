//! [`ActorEntity`] implementation for [`Channel`].

use crate::error::Error;
use crate::framework::ActorEntity;
use crate::model::{Channel, ChannelCreate, ChannelId, ChannelQuery};
use async_trait::async_trait;

#[async_trait]
impl ActorEntity for Channel {
    type Id = ChannelId;
    type Create = ChannelCreate;
    type Query = ChannelQuery;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = Error;

    fn id(&self) -> &ChannelId {
        Channel::id(self)
    }

    fn new_id() -> ChannelId {
        uuid::Uuid::new_v4().simple().to_string().to_uppercase()
    }

    fn from_create_params(id: ChannelId, params: ChannelCreate) -> Result<Self, Error> {
        if params.user_a.is_empty() || params.user_b.is_empty() {
            return Err(create_error!(InvalidProperty));
        }
        Ok(params.into_channel(id))
    }

    fn matches(&self, query: &ChannelQuery) -> bool {
        match query {
            ChannelQuery::DirectMessage { user_a, user_b } => self.connects(user_a, user_b),
            ChannelQuery::Participant(user) => self.includes(user),
        }
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Error> {
        Err(create_error!(InvalidOperation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_matching() {
        let channel = Channel::from_create_params(
            "C1".into(),
            ChannelCreate {
                user_a: "A".into(),
                user_b: "B".into(),
            },
        )
        .unwrap();

        assert!(channel.matches(&ChannelQuery::DirectMessage {
            user_a: "B".into(),
            user_b: "A".into(),
        }));
        assert!(channel.matches(&ChannelQuery::Participant("A".into())));
        assert!(!channel.matches(&ChannelQuery::Participant("C".into())));
    }
}
