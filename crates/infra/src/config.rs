//! Configuration loading and representation.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use shelflife_observability::LogFormat;

use crate::triggers::RecurringTrigger;

/// Environment variable prefix, e.g. `SHELFLIFE_SCHEDULE`.
pub const ENV_PREFIX: &str = "SHELFLIFE_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration from environment: {0}")]
    Env(#[from] envy::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Process configuration, read from `SHELFLIFE_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AppConfig {
    /// HTTP listen address.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Cron expression for the recurring trigger (six fields, local time).
    #[serde(default = "default_schedule")]
    pub schedule: String,

    #[serde(default = "default_recurring_enabled")]
    pub recurring_enabled: bool,

    /// Upper bound for a single store call, in milliseconds.
    #[serde(default = "default_store_timeout_ms")]
    pub store_timeout_ms: u64,

    /// Upper bound for a single transport send, in milliseconds.
    #[serde(default = "default_transport_timeout_ms")]
    pub transport_timeout_ms: u64,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Seed the in-memory store with a demo owner on startup.
    #[serde(default = "default_seed_demo_data")]
    pub seed_demo_data: bool,

    /// Sign-off line of every alert.
    #[serde(default = "default_signature")]
    pub signature: String,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_schedule() -> String {
    "0 0 9 * * *".to_string()
}

fn default_recurring_enabled() -> bool {
    true
}

fn default_store_timeout_ms() -> u64 {
    5_000
}

fn default_transport_timeout_ms() -> u64 {
    10_000
}

fn default_seed_demo_data() -> bool {
    true
}

fn default_signature() -> String {
    "Inventory Expiry Monitor".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            schedule: default_schedule(),
            recurring_enabled: default_recurring_enabled(),
            store_timeout_ms: default_store_timeout_ms(),
            transport_timeout_ms: default_transport_timeout_ms(),
            log_format: LogFormat::default(),
            seed_demo_data: default_seed_demo_data(),
            signature: default_signature(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of variables (tests).
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let cfg: Self = envy::prefixed(ENV_PREFIX).from_iter(vars)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        RecurringTrigger::new(&self.schedule).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        if self.store_timeout_ms == 0 {
            return Err(ConfigError::Invalid("store_timeout_ms must be > 0".to_string()));
        }
        if self.transport_timeout_ms == 0 {
            return Err(ConfigError::Invalid("transport_timeout_ms must be > 0".to_string()));
        }
        Ok(())
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }

    pub fn transport_timeout(&self) -> Duration {
        Duration::from_millis(self.transport_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let cfg = AppConfig::from_vars(vars(&[("PATH", "/usr/bin")])).unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.store_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn reads_prefixed_variables() {
        let cfg = AppConfig::from_vars(vars(&[
            ("SHELFLIFE_SCHEDULE", "0 30 7 * * *"),
            ("SHELFLIFE_RECURRING_ENABLED", "false"),
            ("SHELFLIFE_LOG_FORMAT", "pretty"),
            ("SHELFLIFE_TRANSPORT_TIMEOUT_MS", "250"),
        ]))
        .unwrap();

        assert_eq!(cfg.schedule, "0 30 7 * * *");
        assert!(!cfg.recurring_enabled);
        assert_eq!(cfg.log_format, LogFormat::Pretty);
        assert_eq!(cfg.transport_timeout(), Duration::from_millis(250));
    }

    #[test]
    fn rejects_bad_schedule() {
        let err = AppConfig::from_vars(vars(&[("SHELFLIFE_SCHEDULE", "daily")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_zero_timeouts() {
        let err = AppConfig::from_vars(vars(&[("SHELFLIFE_STORE_TIMEOUT_MS", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
