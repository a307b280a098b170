//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient).
//!
//! Every client maps [`FrameworkError`](crate::framework::FrameworkError) into the backend
//! [`Error`](crate::error::Error) value, so transport faults reach callers as
//! `BackendUnavailable` data rather than as a separate error channel.

pub mod channel_client;
pub mod user_client;

pub use channel_client::*;
pub use user_client::*;
