//! Rescue reports submitted by the public.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{lenient, merge_fields, RecordKey, Resource};

/// Progress of a rescue report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RescueStatus {
    #[default]
    Reported,
    InProgress,
    Rescued,
    Closed,
}

impl RescueStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reported => "reported",
            Self::InProgress => "in-progress",
            Self::Rescued => "rescued",
            Self::Closed => "closed",
        }
    }

    /// Still needs attention from the rescue team
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Reported | Self::InProgress)
    }
}

impl fmt::Display for RescueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How quickly the reporter thinks help is needed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

/// A report of a dog that needs rescuing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RescueSubmission {
    #[serde(flatten)]
    pub key: RecordKey,
    #[serde(default)]
    pub reporter_name: String,
    #[serde(default)]
    pub reporter_email: String,
    #[serde(default)]
    pub reporter_phone: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub dog_condition: String,
    #[serde(default, deserialize_with = "lenient")]
    pub urgency: Urgency,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub status: RescueStatus,
}

impl RescueSubmission {
    pub fn new(reporter_name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            reporter_name: reporter_name.into(),
            location: location.into(),
            ..Self::default()
        }
    }
}

/// Partial update for a [`RescueSubmission`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RescuePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reporter_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reporter_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reporter_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dog_condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency: Option<Urgency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RescueStatus>,
}

impl Resource for RescueSubmission {
    const NAME: &'static str = "rescue submission";
    const COLLECTION: &'static str = "/rescue-submissions";

    type Patch = RescuePatch;
    type Status = RescueStatus;

    fn key(&self) -> &RecordKey {
        &self.key
    }

    fn key_mut(&mut self) -> &mut RecordKey {
        &mut self.key
    }

    fn status(&self) -> RescueStatus {
        self.status
    }

    fn set_status(&mut self, status: RescueStatus) {
        self.status = status;
    }

    fn apply_patch(&mut self, patch: &RescuePatch) {
        merge_fields!(patch => self;
            reporter_name, reporter_email, reporter_phone, location, description,
            dog_condition, urgency, images, status,
        );
    }

    fn seed() -> Vec<Self> {
        vec![
            RescueSubmission {
                key: RecordKey::local(1),
                reporter_name: "Tom Baker".to_string(),
                reporter_email: "tom.b@example.com".to_string(),
                reporter_phone: "555-0201".to_string(),
                location: "Riverside Park, north entrance".to_string(),
                description: "Stray dog sheltering under the footbridge for two days.".to_string(),
                dog_condition: "Thin, limping on front left leg".to_string(),
                urgency: Urgency::High,
                images: vec![],
                status: RescueStatus::Reported,
            },
            RescueSubmission {
                key: RecordKey::local(2),
                reporter_name: "Emily Rossi".to_string(),
                reporter_email: "emily.r@example.com".to_string(),
                reporter_phone: "555-0202".to_string(),
                location: "Highway 9 rest stop".to_string(),
                description: "Puppy left in a cardboard box.".to_string(),
                dog_condition: "Dehydrated".to_string(),
                urgency: Urgency::Critical,
                images: vec!["/images/rescues/box-puppy.jpg".to_string()],
                status: RescueStatus::InProgress,
            },
            RescueSubmission {
                key: RecordKey::local(3),
                reporter_name: "Carlos Diaz".to_string(),
                reporter_email: "carlos.d@example.com".to_string(),
                reporter_phone: String::new(),
                location: "Maple Street alley".to_string(),
                description: "Friendly dog without a collar.".to_string(),
                dog_condition: "Healthy".to_string(),
                urgency: Urgency::Low,
                images: vec![],
                status: RescueStatus::Rescued,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        assert_eq!(serde_json::to_value(RescueStatus::InProgress).unwrap(), "in-progress");
        assert_eq!(RescueStatus::InProgress.to_string(), "in-progress");
        let status: RescueStatus = serde_json::from_str("\"closed\"").unwrap();
        assert_eq!(status, RescueStatus::Closed);
    }

    #[test]
    fn test_open_statuses() {
        assert!(RescueStatus::Reported.is_open());
        assert!(RescueStatus::InProgress.is_open());
        assert!(!RescueStatus::Rescued.is_open());
        assert!(!RescueStatus::Closed.is_open());
    }

    #[test]
    fn test_urgency_ordering() {
        assert!(Urgency::Critical > Urgency::High);
        assert!(Urgency::Low < Urgency::Medium);
    }

    #[test]
    fn test_deserialize_minimal_report() {
        let rescue: RescueSubmission = serde_json::from_value(serde_json::json!({
            "reporterName": "Ana",
            "location": "Dock 4"
        }))
        .unwrap();
        assert_eq!(rescue.urgency, Urgency::Medium);
        assert_eq!(rescue.status, RescueStatus::Reported);
        assert!(rescue.key.is_empty());
    }

    #[test]
    fn test_unknown_urgency_and_missing_reporter() {
        let rescue: RescueSubmission = serde_json::from_value(serde_json::json!({
            "_id": "r9",
            "urgency": "extreme",
            "status": "escalated"
        }))
        .unwrap();
        assert!(rescue.reporter_name.is_empty());
        assert!(rescue.location.is_empty());
        assert_eq!(rescue.urgency, Urgency::Medium);
        assert_eq!(rescue.status, RescueStatus::Reported);
    }
}
