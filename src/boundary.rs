//! # Boundary Adapter
//!
//! The host-facing surface. Sessions and handles are passed explicitly; entity data and
//! errors come back as flat `serde_json::Value`s in the backend's wire shape.
//!
//! | entry point | returns |
//! |---|---|
//! | [`init`] | `()` once the process context exists |
//! | [`database`] | a new [`Database`] session |
//! | [`database_fetch_user`] / [`database_fetch_user_by_username`] | a pending [`OpaqueUser`] |
//! | [`model_resolve`] | resolves an [`OpaqueUser`] once |
//! | [`model_data`] / [`model_error`] | user JSON / `{type, location}`, or `null` |
//! | [`proc_channels_create_dm`] | channel JSON, or `{ "error": ... }` |
//! | [`proc_users_suspend`] | `{}`, or `{ "error": ... }` |
//!
//! An `Err` from any of these is a [`BindingError`]: the host broke a precondition.

use crate::dispatch::{dispatch, CommandInvocation, CreateDm, SuspendUser};
use crate::error::BindingError;
use crate::lifecycle;
use crate::registry::{Database, HandleId, UserHandle};
use crate::resolution;
use serde_json::Value;

/// A user handle as the host sees it: readable, never writable.
#[derive(Debug, Clone)]
pub struct OpaqueUser(UserHandle);

impl OpaqueUser {
    pub fn id(&self) -> HandleId {
        self.0.id()
    }

    pub fn is_pending(&self) -> bool {
        self.0.is_pending()
    }
}

pub fn init() -> Result<(), BindingError> {
    lifecycle::init().map(|_| ())
}

pub fn database() -> Result<Database, BindingError> {
    Ok(lifecycle::context()?.open())
}

pub fn database_fetch_user(db: &Database, user_id: &str) -> OpaqueUser {
    OpaqueUser(db.fetch_user(user_id))
}

pub fn database_fetch_user_by_username(
    db: &Database,
    username: &str,
    discriminator: &str,
) -> OpaqueUser {
    OpaqueUser(db.fetch_user_by_username(username, discriminator))
}

pub async fn model_resolve(db: &Database, model: &OpaqueUser) -> Result<(), BindingError> {
    resolution::resolve(db, &model.0).await
}

pub fn model_data(model: &OpaqueUser) -> Result<Value, BindingError> {
    Ok(match model.0.data() {
        Some(user) => serde_json::to_value(user)?,
        None => Value::Null,
    })
}

pub fn model_error(model: &OpaqueUser) -> Result<Value, BindingError> {
    Ok(match model.0.error() {
        Some(error) => serde_json::to_value(error)?,
        None => Value::Null,
    })
}

/// Host numbers arrive as `f64`; only finite whole numbers are durations.
fn whole_days(duration: f64) -> Result<i64, BindingError> {
    if !duration.is_finite() || duration.fract() != 0.0 {
        return Err(BindingError::invalid_argument(
            "duration",
            format!("{duration} is not a whole number of days"),
        ));
    }
    if duration < i64::MIN as f64 || duration > i64::MAX as f64 {
        return Err(BindingError::invalid_argument(
            "duration",
            format!("{duration} is out of range"),
        ));
    }
    Ok(duration as i64)
}

macro_rules! procedures {
    ( $( $(#[$meta:meta])* $group:ident :: $name:ident ( $( $arg:ident : $ty:ty ),* ) => $build:expr ; )* ) => {
        ::paste::paste! {
            $(
                $(#[$meta])*
                pub async fn [<proc_ $group _ $name>](db: &Database, $( $arg: $ty ),*) -> Result<Value, BindingError> {
                    let procedure = $build;
                    dispatch(db, CommandInvocation::new(procedure)).await?.into_value()
                }
            )*
        }
    };
}

procedures! {
    /// Create-or-get the direct channel between two users.
    channels::create_dm(user_a: &str, user_b: &str) => CreateDm::new(user_a, user_b);

    /// Suspend a resolved user. `duration` is in days; `0` is indefinite. `reason` is a
    /// `|`-separated list.
    users::suspend(model: &OpaqueUser, duration: f64, reason: &str) =>
        SuspendUser::new(model.0.clone(), whole_days(duration)?, reason);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_days() {
        assert_eq!(whole_days(7.0).unwrap(), 7);
        assert_eq!(whole_days(-5.0).unwrap(), -5);
        assert!(whole_days(1.5).is_err());
        assert!(whole_days(f64::NAN).is_err());
        assert!(whole_days(f64::INFINITY).is_err());
    }
}
