//! Value Generator
//!
//! Random state value generation for CSRF protection.

use std::sync::atomic::{AtomicU64, Ordering};

use base64::Engine;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use ring::rand::{SecureRandom, SystemRandom};

/// Default number of random bytes in a state value (256 bits).
pub const DEFAULT_TOKEN_BYTES: usize = 32;

/// Smallest accepted number of random bytes in a state value.
pub const MIN_TOKEN_BYTES: usize = 32;

/// Largest accepted number of random bytes in a state value.
pub const MAX_TOKEN_BYTES: usize = 128;

/// Value generator interface (for dependency injection).
#[cfg_attr(test, mockall::automock)]
pub trait ValueGenerator: Send + Sync {
    /// Generate a random string suitable for use as state value.
    fn generate(&self) -> String;
}

/// Value generator backed by the operating system CSPRNG.
///
/// Values are URL-safe base64 without padding, so they can be placed in a
/// query parameter as-is. With the default 32 bytes every value is 43
/// characters long.
///
/// If the system random source cannot supply entropy the process aborts.
/// Handing out a weak or empty state value is worse than not running.
#[derive(Clone)]
pub struct CryptoValueGenerator {
    rng: SystemRandom,
    length: usize,
}

impl CryptoValueGenerator {
    /// Create new generator with default length (32 bytes).
    pub fn new() -> Self {
        Self::with_length(DEFAULT_TOKEN_BYTES)
    }

    /// Create generator with custom length in random bytes.
    ///
    /// # Panics
    /// Panics if length is not between 32 and 128.
    pub fn with_length(length: usize) -> Self {
        assert!(
            (MIN_TOKEN_BYTES..=MAX_TOKEN_BYTES).contains(&length),
            "State value length must be between 32 and 128 bytes"
        );
        Self {
            rng: SystemRandom::new(),
            length,
        }
    }

    /// Number of random bytes per value.
    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for CryptoValueGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueGenerator for CryptoValueGenerator {
    fn generate(&self) -> String {
        let mut bytes = vec![0u8; self.length];
        if let Err(err) = self.rng.fill(&mut bytes) {
            tracing::error!(
                error = ?err,
                "secure random source failed to supply entropy, aborting"
            );
            std::process::abort();
        }
        base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(&bytes)
    }
}

/// Deterministic generator yielding incrementing integers.
///
/// Only meant for tests and reproducible local runs.
#[derive(Debug, Default)]
pub struct SequenceValueGenerator {
    next: AtomicU64,
}

impl SequenceValueGenerator {
    /// Create sequence generator starting at `start`.
    pub fn new(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
        }
    }
}

impl ValueGenerator for SequenceValueGenerator {
    fn generate(&self) -> String {
        self.next.fetch_add(1, Ordering::Relaxed).to_string()
    }
}

/// Deterministic generator producing token-shaped values from a seed.
///
/// The same seed always yields the same sequence. Not suitable for
/// production use.
pub struct SeededValueGenerator {
    rng: Mutex<StdRng>,
    length: usize,
}

impl SeededValueGenerator {
    /// Create seeded generator with default length (32 bytes).
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            length: DEFAULT_TOKEN_BYTES,
        }
    }
}

impl ValueGenerator for SeededValueGenerator {
    fn generate(&self) -> String {
        let mut bytes = vec![0u8; self.length];
        self.rng.lock().fill_bytes(&mut bytes);
        base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(&bytes)
    }
}

/// Validate state value format.
pub fn is_valid_token(token: &str) -> bool {
    // URL-safe base64 alphabet: [A-Z] / [a-z] / [0-9] / "-" / "_"
    !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Create production value generator.
pub fn create_value_generator() -> CryptoValueGenerator {
    CryptoValueGenerator::new()
}

/// Create sequence value generator for testing.
pub fn create_sequence_value_generator(start: u64) -> SequenceValueGenerator {
    SequenceValueGenerator::new(start)
}
