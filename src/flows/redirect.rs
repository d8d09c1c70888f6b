//! Redirect State Flow
//!
//! Issues state values before the authorization redirect and redeems them on
//! the callback. A state value is accepted at most once.

use std::sync::Arc;

use url::Url;

use crate::core::{MemStateStore, StateStorer};
use crate::error::{StateError, StateResult};
use crate::types::CallbackParams;

/// Authorization endpoint URL with the state parameter attached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizationRedirect {
    /// Full URL to redirect the user to.
    pub url: String,
    /// State value embedded in the URL.
    pub state: String,
}

/// Redirect state flow over any state store.
pub struct RedirectStateFlow<S: StateStorer + ?Sized> {
    store: Arc<S>,
}

impl<S: StateStorer + ?Sized> Clone for RedirectStateFlow<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: StateStorer + ?Sized> RedirectStateFlow<S> {
    /// Create new redirect state flow.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Underlying state store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Issue a state value remembering where to send the user afterwards.
    pub fn begin(&self, return_url: &str) -> StateResult<String> {
        let state = self.store.new_state(return_url)?;
        tracing::debug!("issued state value for authorization redirect");
        Ok(state)
    }

    /// Issue a state value and attach it to the authorization endpoint URL.
    ///
    /// Existing query parameters on the endpoint are preserved.
    pub fn authorization_url(
        &self,
        authorization_endpoint: &str,
        return_url: &str,
    ) -> StateResult<AuthorizationRedirect> {
        let mut url = Url::parse(authorization_endpoint).map_err(|e| {
            StateError::InvalidArgument {
                message: format!("invalid authorization endpoint: {}", e),
            }
        })?;

        let state = self.begin(return_url)?;
        url.query_pairs_mut().append_pair("state", &state);

        Ok(AuthorizationRedirect {
            url: url.into(),
            state,
        })
    }

    /// Redeem the state carried by an authorization callback.
    ///
    /// Returns the URL stored when the state was issued. The state is
    /// removed first, so replaying the same callback fails with `NotFound`.
    /// A callback reporting a provider error still burns its state and then
    /// fails with `AuthorizationDenied`.
    pub fn complete(&self, callback: &CallbackParams) -> StateResult<String> {
        let Some(state) = callback.state() else {
            tracing::debug!("callback rejected: missing state parameter");
            return Err(StateError::missing_state());
        };

        let return_url = self.store.take(state).map_err(|err| {
            tracing::debug!(code = err.error_code(), "callback state rejected");
            err
        })?;

        if let Some(err) = callback.provider_error() {
            tracing::debug!(code = err.error_code(), "callback carries provider error");
            return Err(err);
        }

        tracing::debug!("callback state accepted");
        Ok(return_url)
    }

    /// Parse a callback URL and redeem its state.
    pub fn complete_url(&self, callback_url: &str) -> StateResult<String> {
        self.complete(&CallbackParams::from_url_str(callback_url)?)
    }
}

/// Create redirect state flow backed by a fresh in-memory store.
pub fn create_redirect_state_flow() -> RedirectStateFlow<MemStateStore> {
    RedirectStateFlow::new(Arc::new(MemStateStore::new()))
}
