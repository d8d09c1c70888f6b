//! State Flows
//!
//! Caller-side helpers for the authorization-code redirect.
//!
//! - **Redirect State Flow**: issue a state value before redirecting the
//!   user, then redeem it exactly once on the callback.

pub mod redirect;

pub use redirect::{create_redirect_state_flow, AuthorizationRedirect, RedirectStateFlow};
