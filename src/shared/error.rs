//! Client Error Types
//!
//! This module defines the errors callers of the data-access layer can observe.
//! Transport failures never show up here: they are absorbed by the switch to
//! local data (see [`crate::client::mode`]).
//!
//! # Error Categories
//!
//! - `NotFound` - The record is absent, in either mode
//! - `DuplicateUsername` - Registration with a username that is taken
//! - `InvalidCredentials` - Login with an unknown username or wrong password
//! - `ValidationRejected` - The remote service refused the request (remote mode only)
//!
//! # Usage
//!
//! ```rust
//! use rescuedesk::shared::error::ClientError;
//!
//! let error = ClientError::not_found("dog", 7u64);
//! assert_eq!(error.to_string(), "dog 7 not found");
//! ```
use thiserror::Error;

/// Result alias for data-access operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors returned by resource clients and the session store
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The record does not exist
    #[error("{resource} {id} not found")]
    NotFound {
        /// Singular resource name, e.g. `dog`
        resource: &'static str,
        /// Identifier that was looked up
        id: String,
    },

    /// The username is already registered
    #[error("username '{username}' is already taken")]
    DuplicateUsername {
        /// The rejected username
        username: String,
    },

    /// Username and password do not match a known account
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The remote service rejected the request with a message
    #[error("request rejected ({status}): {message}")]
    ValidationRejected {
        /// HTTP status reported by the service
        status: u16,
        /// Message from the response payload
        message: String,
    },
}

impl ClientError {
    /// Create a new not-found error
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Create a new duplicate-username error
    pub fn duplicate_username(username: impl Into<String>) -> Self {
        Self::DuplicateUsername {
            username: username.into(),
        }
    }

    /// Create a new validation error
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::ValidationRejected {
            status,
            message: message.into(),
        }
    }

    /// Whether this is a `NotFound` error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = ClientError::not_found("volunteer", "65f1c2");
        match &error {
            ClientError::NotFound { resource, id } => {
                assert_eq!(*resource, "volunteer");
                assert_eq!(id, "65f1c2");
            }
            _ => panic!("Expected NotFound"),
        }
        assert!(error.is_not_found());
    }

    #[test]
    fn test_duplicate_username_error() {
        let error = ClientError::duplicate_username("admin");
        assert_eq!(error.to_string(), "username 'admin' is already taken");
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_rejected_error_display() {
        let error = ClientError::rejected(422, "Email is required");
        let display = format!("{}", error);
        assert!(display.contains("422"));
        assert!(display.contains("Email is required"));
    }

    #[test]
    fn test_invalid_credentials_display() {
        assert_eq!(
            ClientError::InvalidCredentials.to_string(),
            "invalid username or password"
        );
    }

    #[test]
    fn test_error_clone() {
        let error = ClientError::rejected(400, "bad");
        assert_eq!(error.clone(), error);
    }
}
