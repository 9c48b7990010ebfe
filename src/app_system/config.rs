use std::env;
use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

pub const MAILBOX_SIZE_VAR: &str = "CART_MAILBOX_SIZE";
pub const CART_SHARDS_VAR: &str = "CART_SHARDS";
pub const LOG_FILTER_VAR: &str = "CART_LOG";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime settings for the service actors.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemConfig {
    /// Capacity of every service mailbox.
    pub mailbox_size: usize,
    /// Number of cart service actors owners are spread over.
    pub cart_shards: usize,
    /// Filter used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            mailbox_size: 100,
            cart_shards: 4,
            log_filter: "info".to_string(),
        }
    }
}

impl SystemConfig {
    /// Reads `CART_MAILBOX_SIZE`, `CART_SHARDS` and `CART_LOG`, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            mailbox_size: try_load(&lookup, MAILBOX_SIZE_VAR, defaults.mailbox_size)?,
            cart_shards: try_load(&lookup, CART_SHARDS_VAR, defaults.cart_shards)?,
            log_filter: lookup(LOG_FILTER_VAR).unwrap_or(defaults.log_filter),
        };
        require_positive(MAILBOX_SIZE_VAR, config.mailbox_size)?;
        require_positive(CART_SHARDS_VAR, config.cart_shards)?;
        Ok(config)
    }
}

fn try_load<T>(lookup: &impl Fn(&str) -> Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}

fn require_positive(key: &'static str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(())
}
