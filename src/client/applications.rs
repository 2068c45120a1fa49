//! Adoption application client

use crate::client::resource::ResourceClient;
use crate::shared::error::ClientResult;
use crate::shared::models::{Application, ApplicationStatus, RecordId};

/// Client for `/applications`
pub type ApplicationClient = ResourceClient<Application>;

impl ResourceClient<Application> {
    /// Applications waiting for a decision
    pub async fn pending(&self) -> ClientResult<Vec<Application>> {
        self.filter_status(|status| status == ApplicationStatus::Pending).await
    }

    /// Every application for one dog
    pub async fn for_dog(&self, dog_id: &RecordId) -> ClientResult<Vec<Application>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|application| application.is_for(dog_id))
            .collect())
    }

    pub async fn set_status(&self, id: &RecordId, status: ApplicationStatus) -> ClientResult<Application> {
        self.update_status(id, status).await
    }

    pub async fn approve(&self, id: &RecordId) -> ClientResult<Application> {
        self.set_status(id, ApplicationStatus::Approved).await
    }

    pub async fn reject(&self, id: &RecordId) -> ClientResult<Application> {
        self.set_status(id, ApplicationStatus::Rejected).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::client::{ApiClient, Config, ModeFlag};
    use crate::shared::models::Resource;

    fn local_applications() -> ApplicationClient {
        let api = ApiClient::new(Config::for_server("http://127.0.0.1:9").unwrap()).unwrap();
        ApplicationClient::with_mode(api, Arc::new(ModeFlag::local()), Application::seed())
    }

    #[tokio::test]
    async fn test_for_dog() {
        let applications = local_applications();
        let names: Vec<_> = applications
            .for_dog(&RecordId::from("1"))
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.applicant_name)
            .collect();
        assert_eq!(names, vec!["Laura Kim", "Nina Alvarez"]);
        assert!(applications.for_dog(&RecordId::Local(2)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_decisions() {
        let applications = local_applications();
        let approved = applications.approve(&RecordId::Local(1)).await.unwrap();
        assert_eq!(approved.status, ApplicationStatus::Approved);
        assert!(applications.pending().await.unwrap().is_empty());

        let reopened = applications
            .set_status(&RecordId::Local(1), ApplicationStatus::Pending)
            .await
            .unwrap();
        assert_eq!(reopened.status, ApplicationStatus::Pending);

        let rejected = applications.reject(&RecordId::Local(1)).await.unwrap();
        assert_eq!(rejected.status, ApplicationStatus::Rejected);
    }
}
