//! Adoption applications.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{lenient, merge_fields, RecordId, RecordKey, Resource};

/// Review status of an adoption application
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An application to adopt a specific dog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(flatten)]
    pub key: RecordKey,
    /// Identifier of the dog being applied for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dog_id: Option<RecordId>,
    #[serde(default)]
    pub dog_name: String,
    #[serde(default)]
    pub applicant_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub housing_type: String,
    #[serde(default)]
    pub has_yard: bool,
    #[serde(default)]
    pub has_other_pets: bool,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default, deserialize_with = "lenient")]
    pub status: ApplicationStatus,
}

impl Application {
    pub fn new(applicant_name: impl Into<String>, dog_id: impl Into<RecordId>) -> Self {
        Self {
            applicant_name: applicant_name.into(),
            dog_id: Some(dog_id.into()),
            ..Self::default()
        }
    }

    /// Whether this application targets `dog`. Ids are compared in canonical
    /// form, so `"2"` and `2` refer to the same dog.
    pub fn is_for(&self, dog: &RecordId) -> bool {
        let Some(own) = &self.dog_id else {
            return false;
        };
        match (own.as_local(), dog.as_local()) {
            (Some(a), Some(b)) => a == b,
            _ => own == dog,
        }
    }
}

/// Partial update for an [`Application`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dog_id: Option<Option<RecordId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dog_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicant_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub housing_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_yard: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_other_pets: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ApplicationStatus>,
}

impl Resource for Application {
    const NAME: &'static str = "application";
    const COLLECTION: &'static str = "/applications";

    type Patch = ApplicationPatch;
    type Status = ApplicationStatus;

    fn key(&self) -> &RecordKey {
        &self.key
    }

    fn key_mut(&mut self) -> &mut RecordKey {
        &mut self.key
    }

    fn status(&self) -> ApplicationStatus {
        self.status
    }

    fn set_status(&mut self, status: ApplicationStatus) {
        self.status = status;
    }

    fn apply_patch(&mut self, patch: &ApplicationPatch) {
        merge_fields!(patch => self;
            dog_id, dog_name, applicant_name, email, phone, address, housing_type,
            has_yard, has_other_pets, experience, reason, status,
        );
    }

    fn seed() -> Vec<Self> {
        vec![
            Application {
                key: RecordKey::local(1),
                dog_id: Some(RecordId::Local(1)),
                dog_name: "Buddy".to_string(),
                applicant_name: "Laura Kim".to_string(),
                email: "laura.k@example.com".to_string(),
                phone: "555-0301".to_string(),
                address: "90 Pine Road".to_string(),
                housing_type: "house".to_string(),
                has_yard: true,
                has_other_pets: false,
                experience: "Grew up with retrievers.".to_string(),
                reason: "Looking for a running partner.".to_string(),
                status: ApplicationStatus::Pending,
            },
            Application {
                key: RecordKey::local(2),
                dog_id: Some(RecordId::Local(3)),
                dog_name: "Max".to_string(),
                applicant_name: "David Okafor".to_string(),
                email: "david.o@example.com".to_string(),
                phone: "555-0302".to_string(),
                address: "15 Cedar Court".to_string(),
                housing_type: "house".to_string(),
                has_yard: true,
                has_other_pets: false,
                experience: "Trained working dogs for ten years.".to_string(),
                reason: "Max would be our only pet.".to_string(),
                status: ApplicationStatus::Approved,
            },
            Application {
                key: RecordKey::local(3),
                dog_id: Some(RecordId::Local(1)),
                dog_name: "Buddy".to_string(),
                applicant_name: "Nina Alvarez".to_string(),
                email: "nina.a@example.com".to_string(),
                phone: "555-0303".to_string(),
                address: "3 Harbor View, Apt 12".to_string(),
                housing_type: "apartment".to_string(),
                has_yard: false,
                has_other_pets: true,
                experience: String::new(),
                reason: "Company for our cat.".to_string(),
                status: ApplicationStatus::Rejected,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_for_coerces_ids() {
        let application = Application::new("Ana", 2u64);
        assert!(application.is_for(&RecordId::Local(2)));
        assert!(application.is_for(&RecordId::from("2")));
        assert!(!application.is_for(&RecordId::Local(3)));

        let remote = Application::new("Ana", "65f1c2ab");
        assert!(remote.is_for(&RecordId::from("65f1c2ab")));
        assert!(!remote.is_for(&RecordId::Local(1)));
    }

    #[test]
    fn test_dog_id_accepts_remote_string() {
        let application: Application = serde_json::from_value(serde_json::json!({
            "_id": "a1",
            "dogId": "65f1c2ab",
            "applicantName": "Ana",
            "hasYard": true
        }))
        .unwrap();
        assert_eq!(application.dog_id, Some(RecordId::from("65f1c2ab")));
        assert!(application.has_yard);
        assert_eq!(application.status, ApplicationStatus::Pending);
    }

    #[test]
    fn test_patch_can_clear_dog_id() {
        let mut application = Application::new("Ana", 2u64);
        application.apply_patch(&ApplicationPatch {
            dog_id: Some(None),
            ..ApplicationPatch::default()
        });
        assert!(application.dog_id.is_none());
    }
}
