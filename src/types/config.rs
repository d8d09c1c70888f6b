//! Configuration Types
//!
//! State store configuration.

use serde::{Deserialize, Serialize};

use crate::core::generator::{DEFAULT_TOKEN_BYTES, MAX_TOKEN_BYTES, MIN_TOKEN_BYTES};
use crate::error::ConfigurationError;

/// State store configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateStoreConfig {
    /// Random bytes per generated state value.
    pub token_bytes: usize,
    /// Number of entries to preallocate in the store.
    pub initial_capacity: usize,
}

impl Default for StateStoreConfig {
    fn default() -> Self {
        Self {
            token_bytes: DEFAULT_TOKEN_BYTES,
            initial_capacity: 0,
        }
    }
}

impl StateStoreConfig {
    /// Parse configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigurationError::ParseFailed {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !(MIN_TOKEN_BYTES..=MAX_TOKEN_BYTES).contains(&self.token_bytes) {
            return Err(ConfigurationError::InvalidConfig {
                message: format!(
                    "token_bytes must be between {} and {}, got {}",
                    MIN_TOKEN_BYTES, MAX_TOKEN_BYTES, self.token_bytes
                ),
            });
        }
        Ok(())
    }
}
