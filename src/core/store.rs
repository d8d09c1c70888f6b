//! State Store
//!
//! Storage for OAuth2 state values and the URLs associated with them.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::core::generator::{CryptoValueGenerator, ValueGenerator};
use crate::error::{StateError, StateResult};

// TODO: expire state values that were never redeemed; entries currently live until deleted.

/// State store interface (for dependency injection).
///
/// Every operation rejects an empty state value with
/// [`StateError::InvalidArgument`].
pub trait StateStorer: Send + Sync {
    /// Create a new random state value and associate the given URL with it.
    fn new_state(&self, url: &str) -> StateResult<String>;

    /// Add a state/URL combination, replacing any previous URL for `state`.
    fn add(&self, state: &str, url: &str) -> StateResult<()>;

    /// Check if the given state value exists in the store.
    fn contains(&self, state: &str) -> StateResult<bool>;

    /// Retrieve the URL associated with a state value.
    fn get(&self, state: &str) -> StateResult<String>;

    /// Delete the given state value. Deleting an unknown value is a no-op.
    fn delete(&self, state: &str) -> StateResult<()>;

    /// Retrieve and remove the URL associated with a state value.
    ///
    /// Implementations should make this a single atomic step so a state
    /// value can be redeemed at most once.
    fn take(&self, state: &str) -> StateResult<String> {
        let url = self.get(state)?;
        self.delete(state)?;
        Ok(url)
    }
}

/// In-memory state store.
///
/// Safe to share between threads behind an `Arc`. Readers run in parallel;
/// writers hold an exclusive lock over the whole map.
pub struct MemStateStore {
    states: RwLock<HashMap<String, String>>,
    value_generator: Arc<dyn ValueGenerator>,
}

impl MemStateStore {
    /// Create new memory store using the secure value generator.
    pub fn new() -> Self {
        Self::with_generator(Arc::new(CryptoValueGenerator::new()))
    }

    /// Create memory store with a custom value generator.
    pub fn with_generator(value_generator: Arc<dyn ValueGenerator>) -> Self {
        Self::with_capacity(value_generator, 0)
    }

    /// Create memory store with a custom value generator and preallocated capacity.
    pub fn with_capacity(value_generator: Arc<dyn ValueGenerator>, capacity: usize) -> Self {
        Self {
            states: RwLock::new(HashMap::with_capacity(capacity)),
            value_generator,
        }
    }

    /// Number of state values currently stored.
    pub fn len(&self) -> usize {
        self.states.read().len()
    }

    /// Check if the store holds no state values.
    pub fn is_empty(&self) -> bool {
        self.states.read().is_empty()
    }

    fn ensure_state(state: &str) -> StateResult<()> {
        if state.is_empty() {
            return Err(StateError::missing_state());
        }
        Ok(())
    }
}

impl Default for MemStateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemStateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemStateStore")
            .field("entries", &self.len())
            .finish_non_exhaustive()
    }
}

impl StateStorer for MemStateStore {
    fn new_state(&self, url: &str) -> StateResult<String> {
        // Generated outside the lock; entropy reads must not stall readers.
        let state = self.value_generator.generate();
        self.add(&state, url)?;
        Ok(state)
    }

    fn add(&self, state: &str, url: &str) -> StateResult<()> {
        Self::ensure_state(state)?;

        let mut states = self.states.write();
        let replaced = states.insert(state.to_string(), url.to_string()).is_some();
        tracing::trace!(entries = states.len(), replaced, "state value added");
        Ok(())
    }

    fn contains(&self, state: &str) -> StateResult<bool> {
        Self::ensure_state(state)?;
        Ok(self.states.read().contains_key(state))
    }

    fn get(&self, state: &str) -> StateResult<String> {
        Self::ensure_state(state)?;
        self.states
            .read()
            .get(state)
            .cloned()
            .ok_or_else(|| StateError::not_found(state))
    }

    fn delete(&self, state: &str) -> StateResult<()> {
        Self::ensure_state(state)?;

        let mut states = self.states.write();
        let removed = states.remove(state).is_some();
        tracing::trace!(entries = states.len(), removed, "state value deleted");
        Ok(())
    }

    fn take(&self, state: &str) -> StateResult<String> {
        Self::ensure_state(state)?;

        let mut states = self.states.write();
        let url = states
            .remove(state)
            .ok_or_else(|| StateError::not_found(state))?;
        tracing::trace!(entries = states.len(), "state value redeemed");
        Ok(url)
    }
}

/// Create in-memory state store with the secure value generator.
pub fn create_state_store() -> MemStateStore {
    MemStateStore::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::generator::{MockValueGenerator, SequenceValueGenerator};

    const URL: &str = "http://test.local";

    fn sequence_store(start: u64) -> MemStateStore {
        MemStateStore::with_generator(Arc::new(SequenceValueGenerator::new(start)))
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = MemStateStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_new_state() {
        let store = sequence_store(256);

        let state = store.new_state(URL).unwrap();
        assert_eq!(state, "256");
        assert_eq!(store.get(&state).unwrap(), URL);
    }

    #[test]
    fn test_new_state_with_crypto_generator() {
        let store = MemStateStore::new();

        let state = store.new_state(URL).unwrap();
        assert_eq!(state.len(), 43);
        assert!(store.contains(&state).unwrap());
    }

    #[test]
    fn test_new_state_propagates_empty_value() {
        let mut generator = MockValueGenerator::new();
        generator.expect_generate().times(1).returning(String::new);
        let store = MemStateStore::with_generator(Arc::new(generator));

        let result = store.new_state(URL);
        assert_eq!(result, Err(StateError::missing_state()));
        assert!(store.is_empty());
    }

    #[test]
    fn test_add() {
        let store = sequence_store(0);
        let state = "A123456789012345678901234567890Z";

        store.add(state, URL).unwrap();
        assert_eq!(store.states.read().get(state).map(String::as_str), Some(URL));

        assert!(matches!(
            store.add("", URL),
            Err(StateError::InvalidArgument { .. })
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_add_overwrites() {
        let store = sequence_store(0);

        store.add("42", "http://first.local").unwrap();
        store.add("42", "http://second.local").unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("42").unwrap(), "http://second.local");
    }

    #[test]
    fn test_contains() {
        let store = sequence_store(0);
        store.add("42", URL).unwrap();

        assert!(store.contains("42").unwrap());
        assert!(!store.contains("43").unwrap());
        assert!(matches!(
            store.contains(""),
            Err(StateError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_get() {
        let store = sequence_store(42);

        assert!(matches!(
            store.get("NotExistingValue"),
            Err(StateError::NotFound { .. })
        ));

        let state = store.new_state(URL).unwrap();
        assert_eq!(store.get(&state).unwrap(), URL);

        assert!(matches!(
            store.get(""),
            Err(StateError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_delete() {
        let store = sequence_store(42);

        assert!(!store.contains("NotExistingValue").unwrap());
        store.delete("NotExistingValue").unwrap();

        let state = store.new_state(URL).unwrap();
        assert!(store.contains(&state).unwrap());

        store.delete(&state).unwrap();
        assert!(!store.contains(&state).unwrap());
        assert!(matches!(store.get(&state), Err(StateError::NotFound { .. })));

        assert!(matches!(
            store.delete(""),
            Err(StateError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_take_is_single_use() {
        let store = sequence_store(1);
        let state = store.new_state(URL).unwrap();

        assert_eq!(store.take(&state).unwrap(), URL);
        assert!(matches!(store.take(&state), Err(StateError::NotFound { .. })));
        assert!(matches!(
            store.take(""),
            Err(StateError::InvalidArgument { .. })
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_example_scenario() {
        let store = MemStateStore::new();
        let url = "http://example.com/return";

        store.add("abc123", url).unwrap();
        assert!(store.contains("abc123").unwrap());
        assert_eq!(store.get("abc123").unwrap(), url);

        store.delete("abc123").unwrap();
        assert_eq!(store.get("abc123"), Err(StateError::not_found("abc123")));
    }

    #[test]
    fn test_debug_hides_entries() {
        let store = sequence_store(0);
        store.add("hidden-state", URL).unwrap();

        let debug = format!("{:?}", store);
        assert!(debug.contains("entries: 1"));
        assert!(!debug.contains("hidden-state"));
    }

    #[test]
    fn test_concurrent_round_trips() {
        let store = Arc::new(MemStateStore::new());

        let handles: Vec<_> = (0..100)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    let url = format!("http://test.local/{}", i);
                    let state = store.new_state(&url).unwrap();
                    assert!(store.contains(&state).unwrap());
                    assert_eq!(store.get(&state).unwrap(), url);
                    store.delete(&state).unwrap();
                    assert!(!store.contains(&state).unwrap());
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert!(store.is_empty());
    }
}
