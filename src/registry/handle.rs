//! Entity handles and the per-session arena that owns their slots.

use super::{HandleId, SessionId};
use crate::error::Error;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

/// How a handle's entity will be looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupKey {
    Id(String),
    Composite {
        username: String,
        discriminator: String,
    },
}

impl LookupKey {
    pub fn kind(&self) -> &'static str {
        match self {
            LookupKey::Id(_) => "id",
            LookupKey::Composite { .. } => "composite",
        }
    }
}

/// Shared state behind a handle. `claimed` flips once when a resolution starts;
/// `outcome` is written once when it finishes.
pub(crate) struct HandleSlot<T> {
    key: LookupKey,
    claimed: AtomicBool,
    outcome: OnceLock<Result<T, Error>>,
}

/// Read-only view of a handle's state.
#[derive(Debug, PartialEq)]
pub enum HandleState<'a, T> {
    Pending,
    Resolved(&'a T),
    Failed(&'a Error),
}

/// A reference to an entity that may not have been fetched yet.
///
/// Handles are cheap to clone; every clone observes the same slot. Nothing outside the
/// crate can change a handle's state.
pub struct EntityHandle<T> {
    id: HandleId,
    session: SessionId,
    slot: Arc<HandleSlot<T>>,
}

impl<T> Clone for EntityHandle<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            session: self.session,
            slot: self.slot.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for EntityHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityHandle")
            .field("id", &self.id)
            .field("session", &self.session)
            .field("key", &self.slot.key)
            .field("state", &self.state())
            .finish()
    }
}

impl<T> EntityHandle<T> {
    pub fn id(&self) -> HandleId {
        self.id
    }

    /// The session that spawned this handle.
    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn key(&self) -> &LookupKey {
        &self.slot.key
    }

    /// A handle whose resolution is still in flight reads as `Pending`.
    pub fn state(&self) -> HandleState<'_, T> {
        match self.slot.outcome.get() {
            None => HandleState::Pending,
            Some(Ok(value)) => HandleState::Resolved(value),
            Some(Err(error)) => HandleState::Failed(error),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state(), HandleState::Pending)
    }

    pub fn data(&self) -> Option<&T> {
        match self.state() {
            HandleState::Resolved(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&Error> {
        match self.state() {
            HandleState::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// Take the right to resolve this handle. Succeeds for exactly one caller.
    pub(crate) fn claim(&self) -> bool {
        !self.slot.claimed.swap(true, Ordering::SeqCst)
    }

    /// Record the outcome. Returns `false` if one was already recorded.
    pub(crate) fn publish(&self, outcome: Result<T, Error>) -> bool {
        self.slot.outcome.set(outcome).is_ok()
    }
}

/// Append-only store of handle slots for one session.
pub(crate) struct HandleArena<T> {
    next: AtomicU64,
    slots: Mutex<HashMap<HandleId, Arc<HandleSlot<T>>>>,
}

impl<T> HandleArena<T> {
    pub(crate) fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub(crate) fn spawn(&self, session: SessionId, key: LookupKey) -> EntityHandle<T> {
        let id = HandleId(self.next.fetch_add(1, Ordering::SeqCst));
        let slot = Arc::new(HandleSlot {
            key,
            claimed: AtomicBool::new(false),
            outcome: OnceLock::new(),
        });
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, slot.clone());

        EntityHandle { id, session, slot }
    }

    pub(crate) fn get(&self, session: SessionId, id: HandleId) -> Option<EntityHandle<T>> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.get(&id).map(|slot| EntityHandle {
            id,
            session,
            slot: slot.clone(),
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}
