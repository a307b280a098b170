use super::UserId;
use serde::{Deserialize, Serialize};

pub type ChannelId = String;

/// A channel record. Only the direct-message kinds are modelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "channel_type")]
pub enum Channel {
    /// Personal "Saved Notes" channel
    SavedMessages {
        #[serde(rename = "_id")]
        id: ChannelId,
        user: UserId,
    },
    /// Direct message channel between two users
    DirectMessage {
        #[serde(rename = "_id")]
        id: ChannelId,
        active: bool,
        recipients: Vec<UserId>,
        #[serde(skip_serializing_if = "Option::is_none")]
        last_message_id: Option<String>,
    },
}

/// Payload for creating the channel between two users.
///
/// `user_a == user_b` describes the user's saved messages channel.
#[derive(Debug, Clone)]
pub struct ChannelCreate {
    pub user_a: UserId,
    pub user_b: UserId,
}

#[derive(Debug, Clone)]
pub enum ChannelQuery {
    /// The direct channel between two users, in either order.
    DirectMessage { user_a: UserId, user_b: UserId },
    /// Every direct channel a user takes part in.
    Participant(UserId),
}

impl Channel {
    pub fn id(&self) -> &ChannelId {
        match self {
            Channel::SavedMessages { id, .. } | Channel::DirectMessage { id, .. } => id,
        }
    }

    pub fn includes(&self, user: &str) -> bool {
        match self {
            Channel::SavedMessages { user: owner, .. } => owner == user,
            Channel::DirectMessage { recipients, .. } => recipients.iter().any(|r| r == user),
        }
    }

    /// Whether this is the direct channel between `user_a` and `user_b`.
    pub fn connects(&self, user_a: &str, user_b: &str) -> bool {
        match self {
            Channel::SavedMessages { user, .. } => user == user_a && user == user_b,
            Channel::DirectMessage { recipients, .. } => {
                user_a != user_b
                    && recipients.len() == 2
                    && self.includes(user_a)
                    && self.includes(user_b)
            }
        }
    }
}

impl ChannelCreate {
    pub fn into_channel(self, id: ChannelId) -> Channel {
        if self.user_a == self.user_b {
            Channel::SavedMessages {
                id,
                user: self.user_a,
            }
        } else {
            Channel::DirectMessage {
                id,
                active: true,
                recipients: vec![self.user_a, self.user_b],
                last_message_id: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(a: &str, b: &str) -> ChannelCreate {
        ChannelCreate {
            user_a: a.into(),
            user_b: b.into(),
        }
    }

    #[test]
    fn test_direct_message_shape() {
        let channel = create("A", "B").into_channel("C1".into());
        let value = serde_json::to_value(&channel).unwrap();

        assert_eq!(value["channel_type"], "DirectMessage");
        assert_eq!(value["_id"], "C1");
        assert_eq!(value["active"], true);
        assert_eq!(value["recipients"], serde_json::json!(["A", "B"]));
        assert!(value.get("last_message_id").is_none());
    }

    #[test]
    fn test_same_user_builds_saved_messages() {
        let channel = create("A", "A").into_channel("C2".into());
        assert!(matches!(channel, Channel::SavedMessages { ref user, .. } if user == "A"));
        assert!(channel.connects("A", "A"));
        assert!(!channel.connects("A", "B"));
    }

    #[test]
    fn test_connects_ignores_order() {
        let channel = create("A", "B").into_channel("C3".into());
        assert!(channel.connects("B", "A"));
        assert!(!channel.connects("A", "A"));
        assert!(!channel.connects("A", "C"));
    }
}
