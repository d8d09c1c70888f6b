//! State Store Error Types
//!
//! Error hierarchy for state store operations.

use thiserror::Error;

/// Root error type for state store operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    // The state value itself is kept out of the message so it never ends up in logs.
    #[error("State value not found in store")]
    NotFound { state: String },

    #[error("Authorization denied by provider: {error}")]
    AuthorizationDenied {
        error: String,
        error_description: Option<String>,
        error_uri: Option<String>,
    },

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

impl StateError {
    /// Error for an empty or missing state argument.
    pub fn missing_state() -> Self {
        Self::InvalidArgument {
            message: "state argument not provided".to_string(),
        }
    }

    /// Error for a state value that is not present in the store.
    pub fn not_found(state: impl Into<String>) -> Self {
        Self::NotFound {
            state: state.into(),
        }
    }

    /// Get error code for telemetry.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "STATE_INVALID_ARGUMENT",
            Self::NotFound { .. } => "STATE_NOT_FOUND",
            Self::AuthorizationDenied { .. } => "STATE_AUTHORIZATION_DENIED",
            Self::Configuration(_) => "STATE_CONFIG",
        }
    }

    /// Check if error is retryable.
    ///
    /// Errors here are caller bugs, rejected state values or a final answer
    /// from the provider; retrying the same call yields the same result.
    pub fn is_retryable(&self) -> bool {
        false
    }

    /// Check if error means the incoming state must be rejected.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Configuration error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Failed to parse configuration: {message}")]
    ParseFailed { message: String },
}

/// Result type for state store operations.
pub type StateResult<T> = Result<T, StateError>;

/// Get user-friendly error message.
pub fn get_user_message(error: &StateError) -> String {
    match error {
        StateError::NotFound { .. } => {
            "Security validation failed. Please restart the sign-in process.".to_string()
        }
        StateError::AuthorizationDenied { .. } => {
            "Access was denied. Please try signing in again and grant the requested permissions."
                .to_string()
        }
        StateError::InvalidArgument { .. } => {
            "The sign-in request was malformed. Please try again.".to_string()
        }
        StateError::Configuration(_) => {
            "Sign-in is not configured correctly. Please contact support.".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(StateError::missing_state().error_code(), "STATE_INVALID_ARGUMENT");
        assert_eq!(StateError::not_found("abc").error_code(), "STATE_NOT_FOUND");
        assert_eq!(
            StateError::from(ConfigurationError::InvalidConfig {
                message: "bad".to_string()
            })
            .error_code(),
            "STATE_CONFIG"
        );
    }

    #[test]
    fn test_not_found_does_not_leak_state() {
        let error = StateError::not_found("secret-state-value");
        assert!(!error.to_string().contains("secret-state-value"));
        assert!(error.is_rejection());
    }

    #[test]
    fn test_nothing_is_retryable() {
        assert!(!StateError::missing_state().is_retryable());
        assert!(!StateError::not_found("x").is_retryable());
        assert!(!StateError::missing_state().is_rejection());
    }

    #[test]
    fn test_authorization_denied() {
        let error = StateError::AuthorizationDenied {
            error: "access_denied".to_string(),
            error_description: None,
            error_uri: None,
        };
        assert_eq!(error.error_code(), "STATE_AUTHORIZATION_DENIED");
        assert!(!error.is_rejection());
        assert!(get_user_message(&error).starts_with("Access was denied"));
    }

    #[test]
    fn test_user_message() {
        let message = get_user_message(&StateError::not_found("x"));
        assert!(message.contains("restart the sign-in"));
    }
}
