//! Volunteer sign-up client

use crate::client::resource::ResourceClient;
use crate::shared::error::ClientResult;
use crate::shared::models::{RecordId, Volunteer, VolunteerStatus};

/// Client for `/volunteers`
pub type VolunteerClient = ResourceClient<Volunteer>;

impl ResourceClient<Volunteer> {
    /// Sign-ups waiting for review
    pub async fn pending(&self) -> ClientResult<Vec<Volunteer>> {
        self.filter_status(|status| status == VolunteerStatus::Pending).await
    }

    pub async fn approve(&self, id: &RecordId) -> ClientResult<Volunteer> {
        self.update_status(id, VolunteerStatus::Approved).await
    }

    pub async fn reject(&self, id: &RecordId) -> ClientResult<Volunteer> {
        self.update_status(id, VolunteerStatus::Rejected).await
    }
}
