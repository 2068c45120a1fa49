/**
 * Wire Types Module
 *
 * Request bodies and response envelopes exchanged with the REST service.
 */

use serde::{Deserialize, Serialize};

use crate::shared::models::User;

/// Envelope around every resource response: `{ "data": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// Envelope around auth responses
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Credentials for `login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Payload for `register`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: String,
}

/// Body for status-only updates
#[derive(Debug, Clone, Serialize)]
pub(crate) struct StatusBody<S> {
    pub status: S,
}

/// Returned by a successful login or registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSuccess {
    pub token: String,
    pub user: User,
    pub message: Option<String>,
}
