//! Runtime configuration, read from the environment (and a `.env` file when present).

use std::env;
use std::time::Duration;

pub const ENV_REQUEST_TIMEOUT_MS: &str = "BINDING_REQUEST_TIMEOUT_MS";
pub const ENV_CHANNEL_BUFFER: &str = "BINDING_CHANNEL_BUFFER";
pub const ENV_WORKER_THREADS: &str = "BINDING_WORKER_THREADS";
pub const ENV_LOG: &str = "BINDING_LOG";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key}={value:?} is invalid: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingConfig {
    /// Upper bound on a single backend round trip.
    pub request_timeout: Duration,
    /// Capacity of each store's request queue.
    pub channel_buffer: usize,
    /// Worker threads of the runtime built by [`init`](crate::lifecycle::init).
    pub worker_threads: usize,
    /// Default tracing filter; `RUST_LOG` takes precedence.
    pub log_filter: String,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_millis(5_000),
            channel_buffer: 32,
            worker_threads: 2,
            log_filter: "info".to_string(),
        }
    }
}

impl BindingConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Missing keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let request_timeout = match lookup(ENV_REQUEST_TIMEOUT_MS) {
            Some(raw) => Duration::from_millis(parse_positive(ENV_REQUEST_TIMEOUT_MS, &raw)?),
            None => defaults.request_timeout,
        };

        let channel_buffer = match lookup(ENV_CHANNEL_BUFFER) {
            Some(raw) => parse_positive(ENV_CHANNEL_BUFFER, &raw)? as usize,
            None => defaults.channel_buffer,
        };

        let worker_threads = match lookup(ENV_WORKER_THREADS) {
            Some(raw) => parse_positive(ENV_WORKER_THREADS, &raw)? as usize,
            None => defaults.worker_threads,
        };

        let log_filter = lookup(ENV_LOG)
            .filter(|raw| !raw.trim().is_empty())
            .unwrap_or(defaults.log_filter);

        Ok(Self {
            request_timeout,
            channel_buffer,
            worker_threads,
            log_filter,
        })
    }
}

fn parse_positive(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    let invalid = |reason: &str| ConfigError::Invalid {
        key,
        value: raw.to_string(),
        reason: reason.to_string(),
    };

    match raw.trim().parse::<u64>() {
        Ok(0) => Err(invalid("must be greater than zero")),
        Ok(value) => Ok(value),
        Err(_) => Err(invalid("must be a whole number")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = BindingConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, BindingConfig::default());
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_overrides() {
        let config = BindingConfig::from_lookup(lookup(&[
            (ENV_REQUEST_TIMEOUT_MS, "250"),
            (ENV_CHANNEL_BUFFER, "8"),
            (ENV_WORKER_THREADS, "4"),
            (ENV_LOG, "userstore_binding=debug"),
        ]))
        .unwrap();

        assert_eq!(config.request_timeout, Duration::from_millis(250));
        assert_eq!(config.channel_buffer, 8);
        assert_eq!(config.worker_threads, 4);
        assert_eq!(config.log_filter, "userstore_binding=debug");
    }

    #[test]
    fn test_rejects_zero_and_garbage() {
        let zero = BindingConfig::from_lookup(lookup(&[(ENV_CHANNEL_BUFFER, "0")]));
        assert!(matches!(zero, Err(ConfigError::Invalid { key: ENV_CHANNEL_BUFFER, .. })));

        let garbage = BindingConfig::from_lookup(lookup(&[(ENV_REQUEST_TIMEOUT_MS, "soon")]));
        assert!(matches!(
            garbage,
            Err(ConfigError::Invalid { key: ENV_REQUEST_TIMEOUT_MS, .. })
        ));
    }
}
