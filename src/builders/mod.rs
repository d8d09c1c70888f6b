//! Builders
//!
//! Fluent builder for state store construction.

pub mod store;

pub use store::{state_store, StateStoreBuilder};
