//! Resource records and their identifiers.
//!
//! Every record carries a [`RecordKey`]: the remote service assigns a string
//! `_id`, the local synthetic store assigns a numeric `id`. Before any
//! comparison the key is reduced to one canonical [`RecordId`].

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

pub mod application;
pub mod dog;
pub mod rescue;
pub mod user;
pub mod volunteer;

pub use application::{Application, ApplicationPatch, ApplicationStatus};
pub use dog::{Dog, DogPatch, DogStatus};
pub use rescue::{RescuePatch, RescueStatus, RescueSubmission, Urgency};
pub use user::{Role, User};
pub use volunteer::{Volunteer, VolunteerPatch, VolunteerStatus};

/// A canonical record identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// Numeric id from the local synthetic store
    Local(u64),
    /// Opaque id issued by the remote service
    Remote(String),
}

impl RecordId {
    /// Coerce to a local numeric id. Remote ids only match when they are
    /// decimal strings.
    pub fn as_local(&self) -> Option<u64> {
        match self {
            Self::Local(id) => Some(*id),
            Self::Remote(id) => id.trim().parse().ok(),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(id) => write!(f, "{}", id),
            Self::Remote(id) => f.write_str(id),
        }
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        Self::Local(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self::Remote(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self::Remote(id)
    }
}

/// The dual identifier carried by every record on the wire
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordKey {
    /// Identifier assigned by the remote service
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub remote_id: Option<String>,
    /// Numeric identifier (the server may also send a string here)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
}

impl RecordKey {
    /// Key for a record in the local store, with the numeric id mirrored
    /// into `_id`.
    pub fn local(id: u64) -> Self {
        Self {
            remote_id: Some(id.to_string()),
            id: Some(RecordId::Local(id)),
        }
    }

    /// Key for a record issued by the remote service
    pub fn remote(id: impl Into<String>) -> Self {
        Self {
            remote_id: Some(id.into()),
            id: None,
        }
    }

    /// The canonical identifier. `id` wins over `_id` when both are present.
    pub fn canonical(&self) -> Option<RecordId> {
        self.id
            .clone()
            .or_else(|| self.remote_id.clone().map(RecordId::Remote))
    }

    /// The canonical identifier coerced to a local numeric id
    pub fn local_id(&self) -> Option<u64> {
        self.canonical().and_then(|id| id.as_local())
    }

    /// Write the canonical identifier back into `id`
    pub fn reconcile(&mut self) {
        self.id = self.canonical();
    }

    /// Whether neither identifier is set
    pub fn is_empty(&self) -> bool {
        self.remote_id.is_none() && self.id.is_none()
    }
}

/// A record type served by a REST collection
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Singular name used in logs and errors
    const NAME: &'static str;
    /// Collection path below the API base URL
    const COLLECTION: &'static str;

    /// Partial update with only the fields to change
    type Patch: Serialize + Send + Sync;
    /// Lifecycle status
    type Status: Serialize + Copy + fmt::Display + Send + Sync;

    fn key(&self) -> &RecordKey;
    fn key_mut(&mut self) -> &mut RecordKey;
    fn status(&self) -> Self::Status;
    fn set_status(&mut self, status: Self::Status);

    /// Shallow-merge the present fields of `patch`. Ids are never touched.
    fn apply_patch(&mut self, patch: &Self::Patch);

    /// Synthetic records served after falling back to local data
    fn seed() -> Vec<Self>;

    /// Reconcile the key in place and return the record
    fn reconciled(mut self) -> Self {
        self.key_mut().reconcile();
        self
    }
}

/// Decode a field, falling back to its default when the value is not one
/// this crate knows (a status added on the server, for instance).
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value.clone()).unwrap_or_else(|_| {
        tracing::debug!("[DATA] Unrecognized value {}; using default", value);
        T::default()
    }))
}

/// Copy every `Some` field of a patch onto the record.
macro_rules! merge_fields {
    ($patch:expr => $record:expr; $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = &$patch.$field {
                $record.$field = value.clone();
            }
        )+
    };
}
pub(crate) use merge_fields;
