//! # Handle Registry
//!
//! A [`Database`] is one host session. It owns an arena of entity handles and the backend
//! clients used to resolve them. Spawning a handle never touches the backend: the handle
//! starts `Pending` and only changes when [`resolution`](crate::resolution) runs.
//!
//! Sessions are registered in a [`SessionTable`] that lives as long as its
//! [`BindingContext`](crate::lifecycle::BindingContext).

pub mod handle;

pub use handle::{EntityHandle, HandleState, LookupKey};

use crate::lifecycle::BackendClients;
use crate::model::User;
use handle::HandleArena;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::runtime::Handle;
use tracing::debug;

pub type UserHandle = EntityHandle<User>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub(crate) u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandleId(pub(crate) u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

struct Session {
    id: SessionId,
    users: HandleArena<User>,
    clients: BackendClients,
    spawner: Handle,
}

/// A host session.
#[derive(Clone)]
pub struct Database {
    session: Arc<Session>,
}

impl fmt::Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Database")
            .field("id", &self.session.id)
            .field("handles", &self.handle_count())
            .finish()
    }
}

impl Database {
    pub fn id(&self) -> SessionId {
        self.session.id
    }

    /// Create a pending user handle bound to this session.
    pub fn spawn_user_handle(&self, key: LookupKey) -> UserHandle {
        let handle = self.session.users.spawn(self.session.id, key);
        debug!(session = %self.session.id, handle = %handle.id(), key = handle.key().kind(), "Spawned handle");
        handle
    }

    pub fn fetch_user(&self, user_id: impl Into<String>) -> UserHandle {
        self.spawn_user_handle(LookupKey::Id(user_id.into()))
    }

    pub fn fetch_user_by_username(
        &self,
        username: impl Into<String>,
        discriminator: impl Into<String>,
    ) -> UserHandle {
        self.spawn_user_handle(LookupKey::Composite {
            username: username.into(),
            discriminator: discriminator.into(),
        })
    }

    pub fn handle(&self, id: HandleId) -> Option<UserHandle> {
        self.session.users.get(self.session.id, id)
    }

    pub fn handle_count(&self) -> usize {
        self.session.users.len()
    }

    /// Whether `handle` was spawned by this session.
    pub fn owns<T>(&self, handle: &EntityHandle<T>) -> bool {
        handle.session() == self.session.id
    }

    pub fn clients(&self) -> &BackendClients {
        &self.session.clients
    }

    pub(crate) fn spawner(&self) -> &Handle {
        &self.session.spawner
    }
}

/// Every session opened in one context.
pub struct SessionTable {
    next: AtomicU64,
    sessions: Mutex<HashMap<SessionId, Database>>,
}

impl Default for SessionTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionTable {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub(crate) fn open(&self, clients: BackendClients, spawner: Handle) -> Database {
        let id = SessionId(self.next.fetch_add(1, Ordering::SeqCst));
        let database = Database {
            session: Arc::new(Session {
                id,
                users: HandleArena::new(),
                clients,
                spawner,
            }),
        };
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, database.clone());
        debug!(session = %id, "Opened session");
        database
    }

    pub fn get(&self, id: SessionId) -> Option<Database> {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use crate::config::BindingConfig;
    use crate::lifecycle::BindingContext;

    #[tokio::test]
    async fn test_spawn_is_local_and_pending() {
        let context = BindingContext::start(BindingConfig::default());
        let db = context.open();

        let by_id = db.fetch_user("01A");
        let by_name = db.fetch_user_by_username("dos", "7624");

        assert!(by_id.is_pending() && by_name.is_pending());
        assert_ne!(by_id.id(), by_name.id());
        assert_eq!(db.handle_count(), 2);
        assert!(db.owns(&by_id));
        assert_eq!(db.handle(by_name.id()).unwrap().key(), by_name.key());
    }

    #[tokio::test]
    async fn test_handles_belong_to_their_session() {
        let context = BindingContext::start(BindingConfig::default());
        let first = context.open();
        let second = context.open();

        let handle = first.fetch_user("01A");
        assert!(!second.owns(&handle));
        assert_eq!(second.handle_count(), 0);
        assert!(second.handle(handle.id()).is_none());
    }
}
