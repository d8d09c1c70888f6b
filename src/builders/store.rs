//! State Store Builder
//!
//! Fluent builder for in-memory state stores.

use std::sync::Arc;

use crate::core::{CryptoValueGenerator, MemStateStore, ValueGenerator};
use crate::error::StateResult;
use crate::types::StateStoreConfig;

/// State store builder.
#[derive(Default)]
pub struct StateStoreBuilder {
    config: StateStoreConfig,
    generator: Option<Arc<dyn ValueGenerator>>,
}

impl StateStoreBuilder {
    /// Create new state store builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set random bytes per generated state value.
    ///
    /// Ignored when a custom generator is supplied.
    pub fn token_bytes(mut self, bytes: usize) -> Self {
        self.config.token_bytes = bytes;
        self
    }

    /// Set initial store capacity.
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.config.initial_capacity = capacity;
        self
    }

    /// Use a custom value generator.
    pub fn generator(mut self, generator: Arc<dyn ValueGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Apply a full configuration.
    pub fn config(mut self, config: StateStoreConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the state store.
    pub fn build(self) -> StateResult<MemStateStore> {
        let generator = match self.generator {
            Some(generator) => generator,
            None => {
                self.config.validate()?;
                Arc::new(CryptoValueGenerator::with_length(self.config.token_bytes))
            }
        };

        tracing::debug!(
            token_bytes = self.config.token_bytes,
            initial_capacity = self.config.initial_capacity,
            "building state store"
        );

        Ok(MemStateStore::with_capacity(
            generator,
            self.config.initial_capacity,
        ))
    }
}

/// Create a new state store builder.
pub fn state_store() -> StateStoreBuilder {
    StateStoreBuilder::new()
}
