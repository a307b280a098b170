//! The procedures a host can dispatch.

use super::reason::SuspensionReasons;
use crate::error::{BindingError, Error};
use crate::lifecycle::BackendClients;
use crate::model::{Channel, SuspensionDuration, UserId};
use crate::registry::{Database, HandleState, UserHandle};
use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;

/// A mutating command against the backend.
///
/// `validate` runs synchronously on the caller's thread and never touches the backend;
/// everything that needs the backend happens in `execute`.
#[async_trait]
pub trait Procedure: Send + Sized + 'static {
    /// Wire name, e.g. `channels_create_dm`.
    const NAME: &'static str;

    /// Arguments after validation.
    type Validated: Send + std::fmt::Debug + 'static;

    type Output: Serialize + Send + 'static;

    fn validate(self, db: &Database) -> Result<Self::Validated, BindingError>;

    async fn execute(validated: Self::Validated, backend: BackendClients) -> Result<Self::Output, Error>;
}

/// Create-or-get the direct channel between two users.
#[derive(Debug, Clone)]
pub struct CreateDm {
    pub user_a: UserId,
    pub user_b: UserId,
}

impl CreateDm {
    pub fn new(user_a: impl Into<UserId>, user_b: impl Into<UserId>) -> Self {
        Self {
            user_a: user_a.into(),
            user_b: user_b.into(),
        }
    }
}

#[async_trait]
impl Procedure for CreateDm {
    const NAME: &'static str = "channels_create_dm";
    type Validated = (UserId, UserId);
    type Output = Channel;

    fn validate(self, _db: &Database) -> Result<(UserId, UserId), BindingError> {
        if self.user_a.is_empty() {
            return Err(BindingError::invalid_argument("user_a", "must not be empty"));
        }
        if self.user_b.is_empty() {
            return Err(BindingError::invalid_argument("user_b", "must not be empty"));
        }
        Ok((self.user_a, self.user_b))
    }

    async fn execute(users: (UserId, UserId), backend: BackendClients) -> Result<Channel, Error> {
        let (user_a, user_b) = users;
        backend.users.fetch_user(&user_a).await?;
        if user_b != user_a {
            backend.users.fetch_user(&user_b).await?;
        }
        backend.channels.find_or_create_dm(&user_a, &user_b).await
    }
}

/// Suspend a resolved user.
///
/// `duration_days` of `0` suspends indefinitely.
#[derive(Debug, Clone)]
pub struct SuspendUser {
    pub user: UserHandle,
    pub duration_days: i64,
    pub reason: String,
}

#[derive(Debug)]
pub struct SuspendPlan {
    pub user_id: UserId,
    pub duration: SuspensionDuration,
    pub reasons: SuspensionReasons,
}

impl SuspendUser {
    pub fn new(user: UserHandle, duration_days: i64, reason: impl Into<String>) -> Self {
        Self {
            user,
            duration_days,
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl Procedure for SuspendUser {
    const NAME: &'static str = "users_suspend";
    type Validated = SuspendPlan;
    type Output = ();

    fn validate(self, db: &Database) -> Result<SuspendPlan, BindingError> {
        if !db.owns(&self.user) {
            return Err(BindingError::ForeignHandle {
                handle: self.user.id(),
                owner: self.user.session(),
                session: db.id(),
            });
        }

        let user_id = match self.user.state() {
            HandleState::Resolved(user) => user.id.clone(),
            HandleState::Pending | HandleState::Failed(_) => {
                return Err(BindingError::UnresolvedHandle {
                    handle: self.user.id(),
                })
            }
        };

        if self.duration_days < 0 {
            return Err(BindingError::invalid_argument(
                "duration",
                format!("{} is negative", self.duration_days),
            ));
        }
        let days = u32::try_from(self.duration_days).map_err(|_| {
            BindingError::invalid_argument("duration", format!("{} is too large", self.duration_days))
        })?;

        let duration = SuspensionDuration::from_days(days);
        duration.until(Utc::now()).map_err(|_| {
            BindingError::invalid_argument("duration", format!("{days} days is past the last representable date"))
        })?;

        Ok(SuspendPlan {
            user_id,
            duration,
            reasons: SuspensionReasons::parse(&self.reason)?,
        })
    }

    async fn execute(plan: SuspendPlan, backend: BackendClients) -> Result<(), Error> {
        backend
            .users
            .suspend(plan.user_id, plan.duration, plan.reasons.into_vec())
            .await
            .map(|_| ())
    }
}
