//! # Errors
//!
//! Two families of errors cross this crate, and they are never mixed:
//!
//! - [`Error`] is the backend error **value**. It is plain data with a `type` tag and a
//!   `location`, and it is returned next to (or instead of) a payload. Backend refusals and
//!   transport faults both end up here.
//! - [`BindingError`] is a **local precondition failure**: the caller misused the binding
//!   (resolved a handle twice, passed a negative duration, ...). These indicate a bug on the
//!   calling side and are returned through the outer `Result`.

use crate::framework::FrameworkError;
use crate::registry::{HandleId, SessionId};
use serde::{Deserialize, Serialize};

#[macro_export]
macro_rules! create_error {
    ( $error: ident $( $tt:tt )? ) => {
        $crate::error::Error {
            error_type: $crate::error::ErrorType::$error $( $tt )?,
            location: format!("{}:{}:{}", file!(), line!(), column!()),
        }
    };
}

#[macro_export]
macro_rules! create_database_error {
    ( $operation: expr, $collection: expr ) => {
        $crate::create_error!(DatabaseError {
            operation: $operation.to_string(),
            collection: $collection.to_string(),
        })
    };
}

/// Result type carrying a backend [`Error`] value.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Backend error value.
///
/// Serialises to `{ "type": "...", "location": "..." }`, plus any fields the
/// variant carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{error_type:?} at {location}")]
pub struct Error {
    /// Type of error and additional information
    #[serde(flatten)]
    pub error_type: ErrorType,

    /// Where this error occurred
    pub location: String,
}

/// Possible error types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ErrorType {
    /// This error was not labeled
    LabelMe,

    // ? General errors
    DatabaseError {
        operation: String,
        collection: String,
    },
    InternalError,
    InvalidOperation,
    InvalidProperty,
    NotFound,
    FailedValidation {
        error: String,
    },

    /// Reserved for "could not ask the backend": closed channel, dropped
    /// response or timeout.
    BackendUnavailable {
        reason: String,
    },
}

impl Error {
    pub fn new(error_type: ErrorType, location: impl Into<String>) -> Self {
        Self {
            error_type,
            location: location.into(),
        }
    }

    /// The `type` tag as it appears on the wire.
    pub fn kind(&self) -> &'static str {
        match self.error_type {
            ErrorType::LabelMe => "LabelMe",
            ErrorType::DatabaseError { .. } => "DatabaseError",
            ErrorType::InternalError => "InternalError",
            ErrorType::InvalidOperation => "InvalidOperation",
            ErrorType::InvalidProperty => "InvalidProperty",
            ErrorType::NotFound => "NotFound",
            ErrorType::FailedValidation { .. } => "FailedValidation",
            ErrorType::BackendUnavailable { .. } => "BackendUnavailable",
        }
    }

    /// Returns `true` when the backend could not be reached at all.
    pub fn is_transport(&self) -> bool {
        matches!(self.error_type, ErrorType::BackendUnavailable { .. })
    }

    /// Normalise a framework error raised while talking to `collection`.
    pub fn from_framework(error: FrameworkError, collection: &str) -> Self {
        match error {
            FrameworkError::ActorClosed => create_error!(BackendUnavailable {
                reason: format!("{collection} store is closed"),
            }),
            FrameworkError::ActorDropped => create_error!(BackendUnavailable {
                reason: format!("{collection} store dropped the request"),
            }),
            FrameworkError::Timeout(after) => create_error!(BackendUnavailable {
                reason: format!("{collection} store timed out after {}ms", after.as_millis()),
            }),
            FrameworkError::NotFound(_) => create_error!(NotFound),
            FrameworkError::AlreadyExists(_) => create_database_error!("insert", collection),
            FrameworkError::EntityError(inner) => match inner.downcast::<Error>() {
                Ok(error) => *error,
                Err(other) => create_error!(FailedValidation {
                    error: other.to_string(),
                }),
            },
        }
    }
}

/// Local precondition failures. Never produced by the backend.
#[derive(Debug, thiserror::Error)]
pub enum BindingError {
    #[error("handle {handle} has already left the pending state")]
    AlreadyResolved { handle: HandleId },

    #[error("handle {handle} is not resolved")]
    UnresolvedHandle { handle: HandleId },

    #[error("handle {handle} belongs to session {owner}, not {session}")]
    ForeignHandle {
        handle: HandleId,
        owner: SessionId,
        session: SessionId,
    },

    #[error("handle {handle} is keyed by {key}, not by {expected}")]
    KeyMismatch {
        handle: HandleId,
        key: &'static str,
        expected: &'static str,
    },

    #[error("invalid argument `{argument}`: {reason}")]
    InvalidArgument {
        argument: &'static str,
        reason: String,
    },

    #[error("binding has not been initialised")]
    NotInitialised,

    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("failed to start runtime: {0}")]
    Runtime(#[from] std::io::Error),

    #[error("background task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),

    #[error("failed to serialise value: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BindingError {
    pub fn invalid_argument(argument: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument,
            reason: reason.into(),
        }
    }
}
