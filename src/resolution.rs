//! # Resolution Engine
//!
//! Moves a handle out of `Pending` exactly once.
//!
//! A resolve call checks three local preconditions, in order, and reports them as
//! [`BindingError`]s:
//!
//! 1. the handle was spawned by `db` ([`BindingError::ForeignHandle`]),
//! 2. the resolution path matches the handle's key ([`BindingError::KeyMismatch`]),
//! 3. no other resolution has claimed the handle ([`BindingError::AlreadyResolved`]).
//!
//! The lookup itself runs on a task spawned on the session's runtime and publishes its
//! outcome before the call returns. Dropping the caller's future does not stop it, so a
//! claimed handle always ends up `Resolved` or `Failed`. Backend refusals and transport
//! faults are recorded as the handle's error, never returned.

use crate::error::BindingError;
use crate::registry::{Database, LookupKey, UserHandle};
use tracing::{debug, info_span, warn, Instrument};

const ID: &str = "id";
const COMPOSITE: &str = "composite";

/// Resolve `handle` along the path its key calls for.
pub async fn resolve(db: &Database, handle: &UserHandle) -> Result<(), BindingError> {
    match handle.key() {
        LookupKey::Id(_) => resolve_by_id(db, handle).await,
        LookupKey::Composite { .. } => resolve_by_composite_key(db, handle).await,
    }
}

pub async fn resolve_by_id(db: &Database, handle: &UserHandle) -> Result<(), BindingError> {
    claim(db, handle, ID)?;
    run(db, handle).await
}

pub async fn resolve_by_composite_key(
    db: &Database,
    handle: &UserHandle,
) -> Result<(), BindingError> {
    claim(db, handle, COMPOSITE)?;
    run(db, handle).await
}

fn claim(db: &Database, handle: &UserHandle, expected: &'static str) -> Result<(), BindingError> {
    if !db.owns(handle) {
        return Err(BindingError::ForeignHandle {
            handle: handle.id(),
            owner: handle.session(),
            session: db.id(),
        });
    }

    let key = handle.key().kind();
    if key != expected {
        return Err(BindingError::KeyMismatch {
            handle: handle.id(),
            key,
            expected,
        });
    }

    if !handle.claim() {
        return Err(BindingError::AlreadyResolved { handle: handle.id() });
    }
    Ok(())
}

async fn run(db: &Database, handle: &UserHandle) -> Result<(), BindingError> {
    let users = db.clients().users.clone();
    let task_handle = handle.clone();
    let span = info_span!("resolve", session = %db.id(), handle = %handle.id(), key = handle.key().kind());

    let lookup = async move {
        let outcome = match task_handle.key() {
            LookupKey::Id(id) => users.fetch_user(id).await,
            LookupKey::Composite {
                username,
                discriminator,
            } => users.fetch_user_by_username(username, discriminator).await,
        };
        match &outcome {
            Ok(user) => debug!(user_id = %user.id, "Resolved"),
            Err(error) => warn!(kind = error.kind(), location = %error.location, "Failed"),
        }
        task_handle.publish(outcome);
    };

    if let Err(e) = db.spawner().spawn(lookup.instrument(span)).await {
        // The task died before publishing; leave the handle failed rather than pending.
        handle.publish(Err(create_error!(InternalError)));
        return Err(e.into());
    }
    Ok(())
}
