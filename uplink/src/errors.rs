//! Error taxonomy for the session and connectivity core.
//!
//! Only authentication and transport failures are ever shown to the user;
//! everything else is absorbed into derived state (no admin menu, a backend
//! "down" indicator, an empty password field) and logged.

use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum Error {
    /// Credentials rejected or session invalid
    #[error("{message}")]
    AuthFailed { message: String },

    /// Network-level failure while talking to the backing API
    #[error("Failed to {operation}: backend unreachable")]
    Transport { operation: String },

    /// Generic internal service error
    #[error("Failed to {operation}")]
    Internal { operation: String },

    /// Unexpected error with full context chain
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Returns a user-safe error message, without leaking internal implementation details
    pub fn user_message(&self) -> String {
        match self {
            Error::AuthFailed { message } => message.clone(),
            Error::Transport { operation } => {
                format!("Could not {operation}: the service is unreachable")
            }
            Error::Internal { .. } | Error::Other(_) => "An internal error occurred".to_string(),
        }
    }
}

/// Type alias for session/gateway operation results
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_failed_message_is_user_visible() {
        let err = Error::AuthFailed {
            message: "Invalid username or password".to_string(),
        };
        assert_eq!(err.user_message(), "Invalid username or password");
        assert_eq!(err.to_string(), "Invalid username or password");
    }

    #[test]
    fn test_internal_errors_do_not_leak_details() {
        let err = Error::Internal {
            operation: "deserialize session payload".to_string(),
        };
        assert_eq!(err.user_message(), "An internal error occurred");

        let err = Error::Other(anyhow::anyhow!("connection pool exhausted"));
        assert_eq!(err.user_message(), "An internal error occurred");
    }

    #[test]
    fn test_transport_message_names_the_operation() {
        let err = Error::Transport {
            operation: "log in".to_string(),
        };
        assert!(err.user_message().contains("log in"));
        assert!(err.user_message().contains("unreachable"));
    }
}
