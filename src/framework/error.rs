//! # Framework Errors
//!
//! Failures raised by the actor plumbing itself. Typed clients turn these into backend
//! [`Error`](crate::error::Error) values with [`Error::from_framework`](crate::error::Error::from_framework).

use std::time::Duration;

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Actor did not answer within {0:?}")]
    Timeout(Duration),
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Item already exists: {0}")]
    AlreadyExists(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Returns `true` when the store could not be reached or did not answer.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::ActorClosed | Self::ActorDropped | Self::Timeout(_)
        )
    }
}
