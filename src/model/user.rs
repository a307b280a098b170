use crate::error::Error;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

pub type UserId = String;

/// Bit flags stored in [`User::flags`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum UserFlags {
    SuspendedUntil = 1,
    Deleted = 2,
    Banned = 4,
    Spam = 8,
}

/// A user record.
///
/// Serialises with `_id` and omits unset optional fields, so a freshly inserted
/// user is just `{ "_id", "username", "discriminator" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub username: String,
    pub discriminator: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspended_until: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspension_reasons: Option<Vec<String>>,
    #[serde(skip_serializing_if = "if_false", default)]
    pub privileged: bool,
}

fn if_false(value: &bool) -> bool {
    !*value
}

/// Creation payload required by [`ActorEntity::Create`](crate::framework::ActorEntity::Create).
/// Users are normally inserted whole.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub username: String,
    pub discriminator: String,
}

/// Lookups understood by the user store.
#[derive(Debug, Clone)]
pub enum UserQuery {
    /// Case-insensitive on the username, exact on the discriminator.
    ByUsername {
        username: String,
        discriminator: String,
    },
}

/// How long a suspension lasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuspensionDuration {
    Indefinite,
    Days(u32),
}

impl SuspensionDuration {
    /// Host convention: `0` days means indefinite.
    pub fn from_days(days: u32) -> Self {
        match days {
            0 => Self::Indefinite,
            days => Self::Days(days),
        }
    }

    /// Expiry relative to `now`, or `None` when indefinite.
    ///
    /// Fails with `InvalidProperty` when the expiry is past the last representable date.
    pub fn until(&self, now: DateTime<Utc>) -> Result<Option<DateTime<Utc>>, Error> {
        match self {
            Self::Indefinite => Ok(None),
            Self::Days(days) => TimeDelta::try_days(i64::from(*days))
                .and_then(|delta| now.checked_add_signed(delta))
                .map(Some)
                .ok_or_else(|| create_error!(InvalidProperty)),
        }
    }
}

impl User {
    pub fn new(
        id: impl Into<UserId>,
        username: impl Into<String>,
        discriminator: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            discriminator: discriminator.into(),
            display_name: None,
            flags: None,
            suspended_until: None,
            suspension_reasons: None,
            privileged: false,
        }
    }

    pub fn has_flag(&self, flag: UserFlags) -> bool {
        (self.flags.unwrap_or_default() & flag as i32) != 0
    }

    /// Mark the user as suspended, replacing any previous suspension.
    ///
    /// The record is left untouched when the expiry cannot be represented.
    pub fn suspend(&mut self, duration: SuspensionDuration, reasons: Vec<String>) -> Result<(), Error> {
        let until = duration.until(Utc::now())?;
        self.flags = Some(self.flags.unwrap_or_default() | UserFlags::SuspendedUntil as i32);
        self.suspended_until = until;
        self.suspension_reasons = if reasons.is_empty() {
            None
        } else {
            Some(reasons)
        };
        Ok(())
    }

    pub fn matches_username(&self, username: &str, discriminator: &str) -> bool {
        self.discriminator == discriminator && self.username.to_lowercase() == username.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_json_shape() {
        let user = User::new("01A", "dos", "7624");
        let value = serde_json::to_value(&user).unwrap();

        assert_eq!(value["_id"], "01A");
        assert_eq!(value["username"], "dos");
        assert_eq!(value["discriminator"], "7624");
        assert_eq!(value.as_object().unwrap().len(), 3);
    }

    #[test]
    fn test_suspend_sets_flag_expiry_and_reasons() {
        let mut user = User::new("01A", "dos", "7624");
        user.suspend(SuspensionDuration::Days(3), vec!["spam".into()]).unwrap();

        assert!(user.has_flag(UserFlags::SuspendedUntil));
        assert!(!user.has_flag(UserFlags::Banned));
        assert!(user.suspended_until.unwrap() > Utc::now() + TimeDelta::days(2));
        assert_eq!(user.suspension_reasons, Some(vec!["spam".to_string()]));
    }

    #[test]
    fn test_indefinite_suspension_has_no_expiry() {
        let mut user = User::new("01A", "dos", "7624");
        user.suspend(SuspensionDuration::from_days(0), vec![]).unwrap();

        assert!(user.has_flag(UserFlags::SuspendedUntil));
        assert!(user.suspended_until.is_none());
        assert!(user.suspension_reasons.is_none());
    }

    #[test]
    fn test_unrepresentable_expiry_leaves_user_untouched() {
        let mut user = User::new("01A", "dos", "7624");
        for days in [100_000_000, u32::MAX] {
            let error = user
                .suspend(SuspensionDuration::Days(days), vec!["spam".into()])
                .unwrap_err();
            assert_eq!(error.kind(), "InvalidProperty");
        }
        assert!(user.flags.is_none());
        assert!(user.suspension_reasons.is_none());

        assert!(SuspensionDuration::Days(90_000_000).until(Utc::now()).unwrap().is_some());
    }

    #[test]
    fn test_username_match_ignores_case_only() {
        let user = User::new("01A", "Dos", "7624");
        assert!(user.matches_username("dOS", "7624"));
        assert!(!user.matches_username("dos", "7625"));
    }
}
