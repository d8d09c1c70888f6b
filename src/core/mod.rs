//! State Core Components
//!
//! Core infrastructure for OAuth2 state handling: value generation and storage.

pub mod generator;
pub mod store;

pub use generator::*;
pub use store::*;
