//! # Command Dispatcher
//!
//! Runs a [`Procedure`] in two phases:
//!
//! 1. **Validate** synchronously. A failure here is a [`BindingError`] in the outer
//!    `Result`, and the backend never sees the request.
//! 2. **Execute** on a task spawned on the session's runtime. Whatever the backend says,
//!    including transport faults, comes back inside the [`CommandOutcome`].
//!
//! ```rust,ignore
//! let outcome = dispatch(&db, CommandInvocation::new(CreateDm::new("A", "B"))).await?;
//! if let Some(error) = &outcome.error {
//!     // backend refusal or BackendUnavailable
//! }
//! ```

pub mod procedure;
pub mod reason;

pub use procedure::*;
pub use reason::*;

use crate::error::{BindingError, Error};
use crate::registry::Database;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, info_span, warn, Instrument};

/// A procedure waiting to be dispatched. Dispatch consumes it.
#[derive(Debug)]
pub struct CommandInvocation<P> {
    procedure: P,
}

impl<P: Procedure> CommandInvocation<P> {
    pub fn new(procedure: P) -> Self {
        Self { procedure }
    }

    pub fn name(&self) -> &'static str {
        P::NAME
    }
}

/// Result of a dispatched procedure. Check `error` before `payload`.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutcome<T> {
    pub payload: Option<T>,
    pub error: Option<Error>,
}

impl<T> From<Result<T, Error>> for CommandOutcome<T> {
    fn from(result: Result<T, Error>) -> Self {
        match result {
            Ok(payload) => Self {
                payload: Some(payload),
                error: None,
            },
            Err(error) => Self {
                payload: None,
                error: Some(error),
            },
        }
    }
}

impl<T> CommandOutcome<T> {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn into_result(self) -> Result<T, Error> {
        match (self.error, self.payload) {
            (Some(error), _) => Err(error),
            (None, Some(payload)) => Ok(payload),
            (None, None) => Err(create_error!(LabelMe)),
        }
    }
}

impl<T: Serialize> CommandOutcome<T> {
    /// Flatten into one JSON object: the payload's fields plus an `error` key when the
    /// procedure failed. A unit payload contributes no fields.
    pub fn into_value(self) -> Result<Value, BindingError> {
        let mut object = match self.payload {
            Some(payload) => match serde_json::to_value(payload)? {
                Value::Object(fields) => fields,
                Value::Null => Map::new(),
                other => Map::from_iter([("value".to_string(), other)]),
            },
            None => Map::new(),
        };
        if let Some(error) = self.error {
            object.insert("error".to_string(), serde_json::to_value(error)?);
        }
        Ok(Value::Object(object))
    }
}

/// Validate `invocation` against `db`, then run it on the backend.
pub async fn dispatch<P: Procedure>(
    db: &Database,
    invocation: CommandInvocation<P>,
) -> Result<CommandOutcome<P::Output>, BindingError> {
    let validated = match invocation.procedure.validate(db) {
        Ok(validated) => validated,
        Err(e) => {
            warn!(procedure = P::NAME, session = %db.id(), error = %e, "Rejected");
            return Err(e);
        }
    };

    let backend = db.clients().clone();
    let span = info_span!("dispatch", procedure = P::NAME, session = %db.id());
    let task = async move {
        info!(args = ?validated, "Dispatching");
        let result = P::execute(validated, backend).await;
        match &result {
            Ok(_) => info!("Completed"),
            Err(error) => warn!(kind = error.kind(), location = %error.location, "Failed"),
        }
        result
    };

    let result = db.spawner().spawn(task.instrument(span)).await?;
    Ok(CommandOutcome::from(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorType;
    use crate::model::Channel;

    #[test]
    fn test_outcome_value_merges_payload_and_error() {
        let channel = Channel::SavedMessages {
            id: "C1".into(),
            user: "A".into(),
        };
        let ok = CommandOutcome::from(Ok::<_, Error>(channel)).into_value().unwrap();
        assert_eq!(ok["_id"], "C1");
        assert!(ok.get("error").is_none());

        let failed = CommandOutcome::<Channel>::from(Err::<Channel, _>(create_error!(NotFound)))
            .into_value()
            .unwrap();
        assert_eq!(failed["error"]["type"], "NotFound");
        assert_eq!(failed.as_object().unwrap().len(), 1);
    }

    #[test]
    fn test_unit_payload_is_an_empty_object() {
        let value = CommandOutcome::from(Ok::<(), Error>(())).into_value().unwrap();
        assert_eq!(value, serde_json::json!({}));
    }

    #[test]
    fn test_into_result_prefers_error() {
        let outcome = CommandOutcome {
            payload: Some(1),
            error: Some(create_error!(InternalError)),
        };
        assert!(!outcome.is_success());
        assert_eq!(outcome.into_result().unwrap_err().error_type, ErrorType::InternalError);
    }
}
