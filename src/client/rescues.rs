//! Rescue report client

use crate::client::resource::ResourceClient;
use crate::shared::error::ClientResult;
use crate::shared::models::{RecordId, RescueStatus, RescueSubmission};

/// Client for `/rescue-submissions`
pub type RescueClient = ResourceClient<RescueSubmission>;

impl ResourceClient<RescueSubmission> {
    /// Reports not yet rescued or closed, most urgent first
    pub async fn open(&self) -> ClientResult<Vec<RescueSubmission>> {
        let mut open = self.filter_status(|status| status.is_open()).await?;
        open.sort_by(|a, b| b.urgency.cmp(&a.urgency));
        Ok(open)
    }

    pub async fn set_status(&self, id: &RecordId, status: RescueStatus) -> ClientResult<RescueSubmission> {
        self.update_status(id, status).await
    }

    pub async fn mark_rescued(&self, id: &RecordId) -> ClientResult<RescueSubmission> {
        self.set_status(id, RescueStatus::Rescued).await
    }

    pub async fn close(&self, id: &RecordId) -> ClientResult<RescueSubmission> {
        self.set_status(id, RescueStatus::Closed).await
    }
}
