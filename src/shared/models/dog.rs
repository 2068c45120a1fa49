//! Dog listings.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{lenient, merge_fields, RecordKey, Resource};

/// Adoption status of a dog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DogStatus {
    #[default]
    Available,
    Pending,
    Adopted,
}

impl DogStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Pending => "pending",
            Self::Adopted => "adopted",
        }
    }
}

impl fmt::Display for DogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dog listed for adoption
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dog {
    #[serde(flatten)]
    pub key: RecordKey,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub breed: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub vaccinated: bool,
    #[serde(default)]
    pub neutered: bool,
    #[serde(default)]
    pub good_with_kids: bool,
    #[serde(default)]
    pub good_with_pets: bool,
    #[serde(default, deserialize_with = "lenient")]
    pub status: DogStatus,
}

impl Dog {
    /// A new, available dog with no identifier yet
    pub fn new(name: impl Into<String>, breed: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            breed: breed.into(),
            ..Self::default()
        }
    }
}

/// Partial update for a [`Dog`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DogPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vaccinated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neutered: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub good_with_kids: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub good_with_pets: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DogStatus>,
}

impl Resource for Dog {
    const NAME: &'static str = "dog";
    const COLLECTION: &'static str = "/dogs";

    type Patch = DogPatch;
    type Status = DogStatus;

    fn key(&self) -> &RecordKey {
        &self.key
    }

    fn key_mut(&mut self) -> &mut RecordKey {
        &mut self.key
    }

    fn status(&self) -> DogStatus {
        self.status
    }

    fn set_status(&mut self, status: DogStatus) {
        self.status = status;
    }

    fn apply_patch(&mut self, patch: &DogPatch) {
        merge_fields!(patch => self;
            name, breed, age, gender, size, color, description, location,
            images, tags, vaccinated, neutered, good_with_kids, good_with_pets, status,
        );
    }

    fn seed() -> Vec<Self> {
        vec![
            Dog {
                key: RecordKey::local(1),
                name: "Buddy".to_string(),
                breed: "Golden Retriever".to_string(),
                age: "3 years".to_string(),
                gender: "male".to_string(),
                size: "large".to_string(),
                color: "golden".to_string(),
                description: "Friendly and energetic, loves fetch and long walks.".to_string(),
                location: "Main Shelter".to_string(),
                images: vec!["/images/dogs/buddy.jpg".to_string()],
                tags: vec!["friendly".to_string(), "active".to_string()],
                vaccinated: true,
                neutered: true,
                good_with_kids: true,
                good_with_pets: true,
                status: DogStatus::Available,
            },
            Dog {
                key: RecordKey::local(2),
                name: "Luna".to_string(),
                breed: "Labrador Mix".to_string(),
                age: "1 year".to_string(),
                gender: "female".to_string(),
                size: "medium".to_string(),
                color: "black".to_string(),
                description: "Playful puppy still learning her manners.".to_string(),
                location: "Foster Home".to_string(),
                images: vec!["/images/dogs/luna.jpg".to_string()],
                tags: vec!["puppy".to_string(), "playful".to_string()],
                vaccinated: true,
                neutered: false,
                good_with_kids: true,
                good_with_pets: false,
                status: DogStatus::Available,
            },
            Dog {
                key: RecordKey::local(3),
                name: "Max".to_string(),
                breed: "German Shepherd".to_string(),
                age: "5 years".to_string(),
                gender: "male".to_string(),
                size: "large".to_string(),
                color: "black and tan".to_string(),
                description: "Calm and loyal, best as the only pet.".to_string(),
                location: "Main Shelter".to_string(),
                images: vec!["/images/dogs/max.jpg".to_string()],
                tags: vec!["loyal".to_string(), "calm".to_string()],
                vaccinated: true,
                neutered: true,
                good_with_kids: false,
                good_with_pets: false,
                status: DogStatus::Pending,
            },
            Dog {
                key: RecordKey::local(4),
                name: "Daisy".to_string(),
                breed: "Beagle".to_string(),
                age: "7 years".to_string(),
                gender: "female".to_string(),
                size: "small".to_string(),
                color: "tricolor".to_string(),
                description: "Gentle senior who enjoys naps in the sun.".to_string(),
                location: "Main Shelter".to_string(),
                images: vec!["/images/dogs/daisy.jpg".to_string()],
                tags: vec!["senior".to_string(), "gentle".to_string()],
                vaccinated: true,
                neutered: true,
                good_with_kids: true,
                good_with_pets: true,
                status: DogStatus::Adopted,
            },
        ]
    }
}
