//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter that hides module
//! paths (`with_target(false)`); stores identify themselves with an `entity_type` field
//! instead.
//!
//! The filter comes from `RUST_LOG` when set, otherwise from the configured default
//! (`BINDING_LOG`, `info` unless overridden).
//!
//! ```bash
//! RUST_LOG=debug cargo test -- --nocapture   # full payloads
//! ```
//!
//! With `info`, a create-or-get DM call looks like:
//!
//! ```text
//! INFO Actor started entity_type="User"
//! INFO dispatch: Dispatching procedure="channels_create_dm" session=1
//! INFO dispatch: Created entity_type="Channel" id=3F2A... size=1
//! ```
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Returns `false` when one was already installed.
pub fn setup_tracing(default_filter: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // Don't show module paths - we use entity_type instead
        .compact()
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_install_is_a_no_op() {
        setup_tracing("warn");
        assert!(!setup_tracing("debug"));
    }
}
