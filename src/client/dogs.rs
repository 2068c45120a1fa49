//! Dog listing client

use crate::client::resource::ResourceClient;
use crate::shared::error::ClientResult;
use crate::shared::models::{Dog, DogStatus, RecordId};

/// Client for `/dogs`
pub type DogClient = ResourceClient<Dog>;

impl ResourceClient<Dog> {
    /// Dogs that can still be adopted
    pub async fn available(&self) -> ClientResult<Vec<Dog>> {
        self.filter_status(|status| status == DogStatus::Available).await
    }

    pub async fn mark_available(&self, id: &RecordId) -> ClientResult<Dog> {
        self.update_status(id, DogStatus::Available).await
    }

    /// An adoption is in progress
    pub async fn mark_pending(&self, id: &RecordId) -> ClientResult<Dog> {
        self.update_status(id, DogStatus::Pending).await
    }

    pub async fn mark_adopted(&self, id: &RecordId) -> ClientResult<Dog> {
        self.update_status(id, DogStatus::Adopted).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::client::{ApiClient, Config, ModeFlag};
    use crate::shared::models::Resource;

    fn local_dogs() -> DogClient {
        let api = ApiClient::new(Config::for_server("http://127.0.0.1:9").unwrap()).unwrap();
        DogClient::with_mode(api, Arc::new(ModeFlag::local()), Dog::seed())
    }

    #[tokio::test]
    async fn test_available_filters_by_status() {
        let dogs = local_dogs();
        let names: Vec<_> = dogs.available().await.unwrap().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["Buddy", "Luna"]);
    }

    #[tokio::test]
    async fn test_adoption_lifecycle() {
        let dogs = local_dogs();
        let id = RecordId::Local(2);

        assert_eq!(dogs.mark_pending(&id).await.unwrap().status, DogStatus::Pending);
        assert_eq!(dogs.mark_adopted(&id).await.unwrap().status, DogStatus::Adopted);
        assert_eq!(dogs.available().await.unwrap().len(), 1);

        assert_eq!(dogs.mark_available(&id).await.unwrap().status, DogStatus::Available);
        assert_eq!(dogs.available().await.unwrap().len(), 2);
    }
}
