use std::env;

use thiserror::Error;

/// Environment variable holding the per-actor mailbox capacity.
pub const MAILBOX_CAPACITY_VAR: &str = "MARKET_MAILBOX_CAPACITY";
/// Environment variable holding the tracing filter directive.
pub const LOG_FILTER_VAR: &str = "RUST_LOG";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidCapacity { var: &'static str, value: String },
}

/// Runtime settings for a [`MarketSystem`](super::MarketSystem).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketConfig {
    /// Bounded mailbox size of each collection actor.
    pub mailbox_capacity: usize,
    /// `EnvFilter` directive used by [`setup_tracing`](super::setup_tracing).
    pub log_filter: String,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            mailbox_capacity: 32,
            log_filter: "info".to_string(),
        }
    }
}

impl MarketConfig {
    /// Reads overrides from the process environment; unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(value) = lookup(MAILBOX_CAPACITY_VAR) {
            config.mailbox_capacity = match value.trim().parse::<usize>() {
                Ok(capacity) if capacity > 0 => capacity,
                _ => return Err(ConfigError::InvalidCapacity { var: MAILBOX_CAPACITY_VAR, value }),
            };
        }
        if let Some(filter) = lookup(LOG_FILTER_VAR) {
            config.log_filter = filter;
        }
        Ok(config)
    }
}
