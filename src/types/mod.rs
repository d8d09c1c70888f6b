//! State Types
//!
//! Configuration and callback types for OAuth2 state handling.

pub mod callback;
pub mod config;

pub use callback::*;
pub use config::*;
