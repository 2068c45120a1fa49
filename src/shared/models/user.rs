//! The cached identity of the signed-in user.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{RecordId, RecordKey};

/// Account role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => f.write_str("admin"),
            Self::User => f.write_str("user"),
        }
    }
}

/// User information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(flatten)]
    pub key: RecordKey,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

impl User {
    /// Canonical identifier of the account, if the server sent one
    pub fn id(&self) -> Option<RecordId> {
        self.key.canonical()
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
