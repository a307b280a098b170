//! [`ActorEntity`] implementation for [`User`].

use super::actions::{UserAction, UserActionResult};
use crate::error::Error;
use crate::framework::ActorEntity;
use crate::model::{User, UserCreate, UserId, UserQuery};
use async_trait::async_trait;
use tracing::info;

#[async_trait]
impl ActorEntity for User {
    type Id = UserId;
    type Create = UserCreate;
    type Query = UserQuery;
    type Action = UserAction;
    type ActionResult = UserActionResult;
    type Context = ();
    type Error = Error;

    fn id(&self) -> &UserId {
        &self.id
    }

    fn new_id() -> UserId {
        uuid::Uuid::new_v4().simple().to_string().to_uppercase()
    }

    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, Error> {
        if params.username.is_empty() || params.discriminator.is_empty() {
            return Err(create_error!(InvalidProperty));
        }
        Ok(Self::new(id, params.username, params.discriminator))
    }

    fn matches(&self, query: &UserQuery) -> bool {
        match query {
            UserQuery::ByUsername {
                username,
                discriminator,
            } => self.matches_username(username, discriminator),
        }
    }

    /// # Actions
    /// - `Suspend`: sets the `SuspendedUntil` flag, the expiry and the reasons
    async fn handle_action(&mut self, action: UserAction, _ctx: &()) -> Result<UserActionResult, Error> {
        match action {
            UserAction::Suspend { duration, reasons } => {
                self.suspend(duration, reasons)?;
                info!(user_id = %self.id, until = ?self.suspended_until, "Suspended");
                Ok(UserActionResult::Suspend(self.clone()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SuspensionDuration, UserFlags};

    #[tokio::test]
    async fn test_suspend_action_updates_record() {
        let mut user = User::new("01A", "dos", "7624");
        let result = user
            .handle_action(
                UserAction::Suspend {
                    duration: SuspensionDuration::Indefinite,
                    reasons: vec!["spam".into()],
                },
                &(),
            )
            .await
            .unwrap();

        let UserActionResult::Suspend(updated) = result;
        assert!(updated.has_flag(UserFlags::SuspendedUntil));
        assert_eq!(updated, user);
    }

    #[tokio::test]
    async fn test_unrepresentable_suspension_is_refused() {
        let mut user = User::new("01A", "dos", "7624");
        let error = user
            .handle_action(
                UserAction::Suspend {
                    duration: SuspensionDuration::Days(u32::MAX),
                    reasons: vec![],
                },
                &(),
            )
            .await
            .unwrap_err();

        assert_eq!(error.kind(), "InvalidProperty");
        assert!(!user.has_flag(UserFlags::SuspendedUntil));
    }

    #[test]
    fn test_create_rejects_empty_key_parts() {
        let params = UserCreate {
            username: String::new(),
            discriminator: "0001".into(),
        };
        assert!(User::from_create_params(User::new_id(), params).is_err());
        assert_ne!(User::new_id(), User::new_id());
    }
}
