//! OAuth2 State Module
//!
//! Concurrency-safe storage of OAuth2 `state` values for CSRF protection in
//! the authorization-code flow.
//!
//! # Features
//!
//! - Cryptographically secure state value generation (OS CSPRNG, URL-safe)
//! - In-memory state store safe for concurrent use behind an `Arc`
//! - Injectable value generators for deterministic tests
//! - Redirect helper that redeems each state value at most once
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use oauth2_state::{state_store, RedirectStateFlow, StateStorer};
//!
//! fn main() -> Result<(), oauth2_state::StateError> {
//!     let store = Arc::new(state_store().build()?);
//!     let flow = RedirectStateFlow::new(Arc::clone(&store));
//!
//!     // Before redirecting the user to the provider
//!     let redirect = flow.authorization_url(
//!         "https://provider.com/authorize?client_id=my-client",
//!         "https://myapp.com/dashboard",
//!     )?;
//!     println!("Redirect to: {}", redirect.url);
//!
//!     // On the callback
//!     let return_url = flow.complete_url(&format!(
//!         "https://myapp.com/callback?code=abc&state={}",
//!         redirect.state
//!     ))?;
//!     assert_eq!(return_url, "https://myapp.com/dashboard");
//!     assert!(!store.contains(&redirect.state)?);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `core`: value generators and the state store
//! - `error`: error taxonomy
//! - `types`: configuration and callback types
//! - `builders`: fluent store builder
//! - `flows`: redirect begin/complete helper
//!
//! State values never expire. A value lives until it is deleted or redeemed.

pub mod builders;
pub mod core;
pub mod error;
pub mod flows;
pub mod types;

// Re-export builders
pub use builders::{state_store, StateStoreBuilder};

// Re-export errors
pub use error::{get_user_message, ConfigurationError, StateError, StateResult};

// Re-export types
pub use types::{CallbackParams, StateStoreConfig};

// Re-export core components
pub use crate::core::{
    // Generator
    create_sequence_value_generator, create_value_generator, is_valid_token,
    CryptoValueGenerator, SeededValueGenerator, SequenceValueGenerator, ValueGenerator,
    DEFAULT_TOKEN_BYTES,
    // Store
    create_state_store, MemStateStore, StateStorer,
};

// Re-export flows
pub use flows::{create_redirect_state_flow, AuthorizationRedirect, RedirectStateFlow};
