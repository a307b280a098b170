//! # Lifecycle
//!
//! Starting and stopping the backend stores, and the process-wide binding context.
//!
//! - [`Backend`] spawns the user and channel actors and hands out their clients. Shutdown
//!   drops the clients, then waits for each actor to drain its queue.
//! - [`BindingContext`] bundles configuration, backend clients, the session table and the
//!   runtime that resolution and dispatch tasks run on.
//! - [`init`] builds the global context once per process; [`context`] reads it back.
//! - [`setup_tracing`] installs the log subscriber.

pub mod backend;
pub mod bootstrap;
pub mod tracing;

pub use backend::*;
pub use bootstrap::*;
pub use self::tracing::*;
