//! Suspension reason lists.
//!
//! Hosts pass reasons joined with `|`. The separator cannot be escaped, so a reason can
//! never contain it.

use crate::error::BindingError;

pub const REASON_SEPARATOR: char = '|';

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuspensionReasons(Vec<String>);

impl SuspensionReasons {
    /// Split a joined reason string. An empty string means no reasons; an empty token
    /// anywhere else (leading, trailing or doubled separator) is rejected.
    pub fn parse(joined: &str) -> Result<Self, BindingError> {
        if joined.is_empty() {
            return Ok(Self::default());
        }
        Self::from_tokens(joined.split(REASON_SEPARATOR))
    }

    /// Build from already-split tokens.
    pub fn from_tokens<I, S>(tokens: I) -> Result<Self, BindingError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        tokens
            .into_iter()
            .map(|token| {
                let token = token.into();
                if token.is_empty() {
                    Err(BindingError::invalid_argument("reason", "empty reason"))
                } else if token.contains(REASON_SEPARATOR) {
                    Err(BindingError::invalid_argument(
                        "reason",
                        format!("{token:?} contains the reserved separator '{REASON_SEPARATOR}'"),
                    ))
                } else {
                    Ok(token)
                }
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}
