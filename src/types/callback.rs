//! Callback Types
//!
//! Query parameters the authorization server sends back on redirect.

use url::Url;

use crate::error::StateError;

/// Parameters of an authorization callback.
///
/// Unknown query parameters are ignored. A repeated parameter keeps its
/// last occurrence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CallbackParams {
    /// Authorization code (if success).
    pub code: Option<String>,
    /// State value issued before the redirect.
    pub state: Option<String>,
    /// Provider error code (if authorization failed).
    pub error: Option<String>,
    pub error_description: Option<String>,
    pub error_uri: Option<String>,
}

impl CallbackParams {
    /// Read callback parameters from a parsed URL.
    pub fn from_url(url: &Url) -> Self {
        url.query_pairs()
            .fold(Self::default(), |mut params, (key, value)| {
                let slot = match key.as_ref() {
                    "code" => &mut params.code,
                    "state" => &mut params.state,
                    "error" => &mut params.error,
                    "error_description" => &mut params.error_description,
                    "error_uri" => &mut params.error_uri,
                    _ => return params,
                };
                *slot = Some(value.into_owned());
                params
            })
    }

    /// Parse a callback URL string.
    pub fn from_url_str(url_str: &str) -> Result<Self, StateError> {
        let url = Url::parse(url_str).map_err(|e| StateError::InvalidArgument {
            message: format!("invalid callback URL: {}", e),
        })?;
        Ok(Self::from_url(&url))
    }

    /// State value, if present and non-empty.
    pub fn state(&self) -> Option<&str> {
        self.state.as_deref().filter(|state| !state.is_empty())
    }

    /// Check if callback contains a provider error.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Check if callback carries a code and no error.
    pub fn is_success(&self) -> bool {
        self.code.is_some() && self.error.is_none()
    }

    /// Provider error carried by the callback, as a state error.
    pub fn provider_error(&self) -> Option<StateError> {
        self.error.as_ref().map(|error| StateError::AuthorizationDenied {
            error: error.clone(),
            error_description: self.error_description.clone(),
            error_uri: self.error_uri.clone(),
        })
    }
}
