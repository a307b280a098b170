use super::backend::{Backend, BackendClients};
use super::tracing::setup_tracing;
use crate::config::BindingConfig;
use crate::error::BindingError;
use crate::registry::{Database, SessionTable};
use std::sync::{Mutex, OnceLock, PoisonError};
use tokio::runtime::{Handle, Runtime};
use tracing::info;

static CONTEXT: OnceLock<BindingContext> = OnceLock::new();
static INIT_LOCK: Mutex<()> = Mutex::new(());

/// Everything a session needs: configuration, backend clients, the session table and a
/// runtime handle to run resolution and dispatch tasks on.
pub struct BindingContext {
    config: BindingConfig,
    clients: BackendClients,
    sessions: SessionTable,
    spawner: Handle,
    /// Owned only by the global context built in [`init`].
    _runtime: Option<Runtime>,
}

impl BindingContext {
    /// Start a backend on the current runtime and wrap it in a context.
    ///
    /// Panics when called outside a tokio runtime, like `tokio::spawn`.
    pub fn start(config: BindingConfig) -> Self {
        let clients = Backend::start(&config).into_clients();
        Self::with_backend(config, clients)
    }

    /// Wrap existing backend clients (for example mocks) in a context bound to the
    /// current runtime.
    pub fn with_backend(config: BindingConfig, clients: BackendClients) -> Self {
        Self {
            config,
            clients,
            sessions: SessionTable::new(),
            spawner: Handle::current(),
            _runtime: None,
        }
    }

    /// Open a new session. Never fails and performs no I/O.
    pub fn open(&self) -> Database {
        self.sessions.open(self.clients.clone(), self.spawner.clone())
    }

    pub fn config(&self) -> &BindingConfig {
        &self.config
    }

    pub fn clients(&self) -> &BackendClients {
        &self.clients
    }

    pub fn sessions(&self) -> &SessionTable {
        &self.sessions
    }
}

/// Build the process-wide context. Calling it again returns the existing context.
///
/// Configuration is read from the environment, the tracing subscriber is installed, and
/// a dedicated multi-thread runtime is built to host the backend stores. Callers may use
/// the async entry points from any executor afterwards.
pub fn init() -> Result<&'static BindingContext, BindingError> {
    if let Some(context) = CONTEXT.get() {
        return Ok(context);
    }

    let _guard = INIT_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(context) = CONTEXT.get() {
        return Ok(context);
    }

    let config = BindingConfig::from_env()?;
    setup_tracing(&config.log_filter);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.worker_threads)
        .thread_name("userstore-binding")
        .enable_all()
        .build()?;

    let clients = {
        let _enter = runtime.enter();
        Backend::start(&config).into_clients()
    };
    info!(workers = config.worker_threads, "Binding initialised");

    let context = BindingContext {
        spawner: runtime.handle().clone(),
        config,
        clients,
        sessions: SessionTable::new(),
        _runtime: Some(runtime),
    };
    Ok(CONTEXT.get_or_init(|| context))
}

/// The context built by [`init`].
pub fn context() -> Result<&'static BindingContext, BindingError> {
    CONTEXT.get().ok_or(BindingError::NotInitialised)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sessions_are_distinct_and_registered() {
        let context = BindingContext::start(BindingConfig::default());
        let first = context.open();
        let second = context.open();

        assert_ne!(first.id(), second.id());
        assert_eq!(context.sessions().len(), 2);
        assert_eq!(context.sessions().get(first.id()).unwrap().id(), first.id());
    }
}
