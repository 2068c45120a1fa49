//! Volunteer sign-ups.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{lenient, merge_fields, RecordKey, Resource};

/// Review status of a volunteer sign-up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolunteerStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl VolunteerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for VolunteerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A person who signed up to volunteer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volunteer {
    #[serde(flatten)]
    pub key: RecordKey,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub availability: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, deserialize_with = "lenient")]
    pub status: VolunteerStatus,
}

impl Volunteer {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Self::default()
        }
    }
}

/// Partial update for a [`Volunteer`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interests: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<VolunteerStatus>,
}

impl Resource for Volunteer {
    const NAME: &'static str = "volunteer";
    const COLLECTION: &'static str = "/volunteers";

    type Patch = VolunteerPatch;
    type Status = VolunteerStatus;

    fn key(&self) -> &RecordKey {
        &self.key
    }

    fn key_mut(&mut self) -> &mut RecordKey {
        &mut self.key
    }

    fn status(&self) -> VolunteerStatus {
        self.status
    }

    fn set_status(&mut self, status: VolunteerStatus) {
        self.status = status;
    }

    fn apply_patch(&mut self, patch: &VolunteerPatch) {
        merge_fields!(patch => self;
            name, email, phone, address, availability, interests, experience, message, status,
        );
    }

    fn seed() -> Vec<Self> {
        vec![
            Volunteer {
                key: RecordKey::local(1),
                name: "Sarah Johnson".to_string(),
                email: "sarah.j@example.com".to_string(),
                phone: "555-0101".to_string(),
                address: "12 Elm Street".to_string(),
                availability: vec!["weekends".to_string()],
                interests: vec!["dog walking".to_string(), "events".to_string()],
                experience: "Two years at a city shelter.".to_string(),
                message: "Happy to help with adoption days.".to_string(),
                status: VolunteerStatus::Approved,
            },
            Volunteer {
                key: RecordKey::local(2),
                name: "Mike Chen".to_string(),
                email: "mike.chen@example.com".to_string(),
                phone: "555-0102".to_string(),
                address: "48 Oak Avenue".to_string(),
                availability: vec!["weekday evenings".to_string()],
                interests: vec!["transport".to_string(), "fostering".to_string()],
                experience: String::new(),
                message: "I have a van and can drive rescues.".to_string(),
                status: VolunteerStatus::Pending,
            },
            Volunteer {
                key: RecordKey::local(3),
                name: "Priya Patel".to_string(),
                email: "priya.p@example.com".to_string(),
                phone: "555-0103".to_string(),
                address: "7 Birch Lane".to_string(),
                availability: vec!["weekdays".to_string(), "weekends".to_string()],
                interests: vec!["grooming".to_string()],
                experience: "Professional groomer.".to_string(),
                message: String::new(),
                status: VolunteerStatus::Pending,
            },
        ]
    }
}
