//! # Resource Client
//!
//! CRUD access to one REST collection, with a local synthetic store behind it.
//!
//! Every operation tries the remote service first. A transport failure flips
//! this client's [`ModeFlag`] to local and the same call is answered from the
//! synthetic store; from then on the network is skipped. Callers only ever see
//! a value or a [`ClientError`].
//!
//! Local mutations run under one lock, so ids assigned by concurrent `create`
//! calls never collide.
//!
//! ```rust,no_run
//! use rescuedesk::client::{ApiClient, Config, ResourceClient};
//! use rescuedesk::shared::models::Dog;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let api = ApiClient::new(Config::new())?;
//! let dogs: ResourceClient<Dog> = ResourceClient::new(api);
//!
//! let rex = dogs.create(Dog::new("Rex", "Mix")).await?;
//! let id = rex.key.canonical().expect("stored records have an id");
//! let again = dogs.get(&id).await?;
//! assert_eq!(again.name, "Rex");
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::client::http::{ApiClient, Rejection};
use crate::client::mode::{Mode, ModeFlag};
use crate::client::types::StatusBody;
use crate::shared::error::{ClientError, ClientResult};
use crate::shared::models::{RecordId, RecordKey, Resource};

const AREA: &str = "DATA";

/// Acknowledgement returned by `delete`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteAck {
    pub id: RecordId,
}

/// Data access for one resource type
#[derive(Debug)]
pub struct ResourceClient<R: Resource> {
    api: ApiClient,
    mode: Arc<ModeFlag>,
    store: Mutex<Vec<R>>,
}

impl<R: Resource> ResourceClient<R> {
    /// A client whose synthetic store holds the resource's seed data
    pub fn new(api: ApiClient) -> Self {
        Self::with_seed(api, R::seed())
    }

    /// A client with a custom synthetic dataset (possibly empty)
    pub fn with_seed(api: ApiClient, seed: Vec<R>) -> Self {
        Self::with_mode(api, Arc::new(ModeFlag::new()), seed)
    }

    /// A client with an injected mode flag
    pub fn with_mode(api: ApiClient, mode: Arc<ModeFlag>, seed: Vec<R>) -> Self {
        Self {
            api,
            mode,
            store: Mutex::new(normalize_seed(seed)),
        }
    }

    /// The mode flag owned by this client
    pub fn mode_flag(&self) -> Arc<ModeFlag> {
        Arc::clone(&self.mode)
    }

    pub async fn mode(&self) -> Mode {
        self.mode.get().await
    }

    pub async fn is_local(&self) -> bool {
        self.mode.is_local().await
    }

    /// All records
    pub async fn list(&self) -> ClientResult<Vec<R>> {
        let call = self.api.get_data::<Vec<R>>(R::COLLECTION);
        if let Some(outcome) = self.mode.attempt(AREA, "list", call).await {
            return outcome
                .map(|records| records.into_iter().map(R::reconciled).collect())
                .map_err(|rejection| self.rejected(rejection, None));
        }

        Ok(self.store.lock().await.clone())
    }

    /// One record by id
    pub async fn get(&self, id: &RecordId) -> ClientResult<R> {
        let path = item_path::<R>(id);
        let call = self.api.get_data::<R>(&path);
        if let Some(outcome) = self.mode.attempt(AREA, "get", call).await {
            return outcome
                .map(R::reconciled)
                .map_err(|rejection| self.rejected(rejection, Some(id)));
        }

        let store = self.store.lock().await;
        position(&store, id)
            .map(|index| store[index].clone())
            .ok_or_else(|| ClientError::not_found(R::NAME, id))
    }

    /// Create a record. Any id on the input is ignored.
    pub async fn create(&self, record: R) -> ClientResult<R> {
        let call = self.api.post_data::<R, R>(R::COLLECTION, &record);
        if let Some(outcome) = self.mode.attempt(AREA, "create", call).await {
            return outcome
                .map(R::reconciled)
                .map_err(|rejection| self.rejected(rejection, None));
        }

        let mut record = record;
        let mut store = self.store.lock().await;
        let id = next_id(&store);
        *record.key_mut() = RecordKey::local(id);
        store.push(record.clone());
        tracing::info!("[{}] Created local {} {}", AREA, R::NAME, id);
        Ok(record)
    }

    /// Shallow-merge `patch` into a record
    pub async fn update(&self, id: &RecordId, patch: &R::Patch) -> ClientResult<R> {
        let path = item_path::<R>(id);
        let call = self.api.put_data::<R::Patch, R>(&path, patch);
        if let Some(outcome) = self.mode.attempt(AREA, "update", call).await {
            return outcome
                .map(R::reconciled)
                .map_err(|rejection| self.rejected(rejection, Some(id)));
        }

        self.modify_local(id, |record| record.apply_patch(patch)).await
    }

    /// Change only the status field
    pub async fn update_status(&self, id: &RecordId, status: R::Status) -> ClientResult<R> {
        let path = format!("{}/status", item_path::<R>(id));
        let body = StatusBody { status };
        let call = self.api.patch_data::<StatusBody<R::Status>, R>(&path, &body);
        let outcome = match self.mode.attempt(AREA, "update_status", call).await {
            Some(outcome) => outcome
                .map(R::reconciled)
                .map_err(|rejection| self.rejected(rejection, Some(id))),
            None => self.modify_local(id, |record| record.set_status(status)).await,
        };

        if outcome.is_ok() {
            tracing::info!("[{}] {} {} status changed to {}", AREA, R::NAME, id, status);
        }
        outcome
    }

    /// Remove a record
    pub async fn delete(&self, id: &RecordId) -> ClientResult<DeleteAck> {
        let path = item_path::<R>(id);
        let call = self.api.delete(&path);
        if let Some(outcome) = self.mode.attempt(AREA, "delete", call).await {
            return outcome
                .map(|()| DeleteAck { id: id.clone() })
                .map_err(|rejection| self.rejected(rejection, Some(id)));
        }

        let mut store = self.store.lock().await;
        let index = position(&store, id).ok_or_else(|| ClientError::not_found(R::NAME, id))?;
        let removed = store.remove(index);
        Ok(DeleteAck {
            id: removed
                .key()
                .canonical()
                .unwrap_or_else(|| id.clone()),
        })
    }

    /// Number of records per status, for dashboard summaries
    pub async fn count_by_status(&self) -> ClientResult<BTreeMap<String, usize>> {
        let mut counts = BTreeMap::new();
        for record in self.list().await? {
            *counts.entry(record.status().to_string()).or_insert(0) += 1;
        }
        Ok(counts)
    }

    /// Records whose status satisfies `keep`
    pub async fn filter_status(&self, keep: impl Fn(R::Status) -> bool) -> ClientResult<Vec<R>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|record| keep(record.status()))
            .collect())
    }

    async fn modify_local(&self, id: &RecordId, change: impl FnOnce(&mut R)) -> ClientResult<R> {
        let mut store = self.store.lock().await;
        let index = position(&store, id).ok_or_else(|| ClientError::not_found(R::NAME, id))?;
        let record = &mut store[index];
        let key = record.key().clone();
        change(record);
        *record.key_mut() = key;
        Ok(record.clone())
    }

    fn rejected(&self, rejection: Rejection, id: Option<&RecordId>) -> ClientError {
        match id {
            Some(id) if rejection.status == reqwest::StatusCode::NOT_FOUND => {
                ClientError::not_found(R::NAME, id)
            }
            _ => ClientError::rejected(rejection.status.as_u16(), rejection.message_or_reason()),
        }
    }
}

fn item_path<R: Resource>(id: &RecordId) -> String {
    format!("{}/{}", R::COLLECTION, id)
}

fn position<R: Resource>(store: &[R], id: &RecordId) -> Option<usize> {
    let wanted = id.as_local()?;
    store
        .iter()
        .position(|record| record.key().local_id() == Some(wanted))
}

fn next_id<R: Resource>(store: &[R]) -> u64 {
    store
        .iter()
        .filter_map(|record| record.key().local_id())
        .max()
        .unwrap_or(0)
        + 1
}

/// Give every seed record a mirrored local key; records without a numeric id
/// get the next free one.
fn normalize_seed<R: Resource>(seed: Vec<R>) -> Vec<R> {
    let mut store: Vec<R> = Vec::with_capacity(seed.len());
    let mut pending = Vec::new();
    for mut record in seed {
        match record.key().local_id() {
            Some(id) if position(&store, &RecordId::Local(id)).is_none() => {
                *record.key_mut() = RecordKey::local(id);
                store.push(record);
            }
            _ => pending.push(record),
        }
    }
    for mut record in pending {
        *record.key_mut() = RecordKey::local(next_id(&store));
        store.push(record);
    }
    store
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::config::Config;
    use crate::shared::models::{Dog, DogPatch, DogStatus};
    use pretty_assertions::assert_eq;

    fn local_client(seed: Vec<Dog>) -> ResourceClient<Dog> {
        let api = ApiClient::new(Config::for_server("http://127.0.0.1:9").unwrap()).unwrap();
        ResourceClient::with_mode(api, Arc::new(ModeFlag::local()), seed)
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let dogs = local_client(vec![]);
        let rex = dogs.create(Dog::new("Rex", "Mix")).await.unwrap();
        let fido = dogs.create(Dog::new("Fido", "Poodle")).await.unwrap();

        assert_eq!(rex.key, RecordKey::local(1));
        assert_eq!(fido.key, RecordKey::local(2));
    }

    #[tokio::test]
    async fn test_create_uses_max_plus_one_after_gaps() {
        let dogs = local_client(Dog::seed());
        dogs.delete(&RecordId::Local(2)).await.unwrap();
        let created = dogs.create(Dog::new("Rex", "Mix")).await.unwrap();
        assert_eq!(created.key.local_id(), Some(5));

        dogs.delete(&RecordId::Local(5)).await.unwrap();
        let created = dogs.create(Dog::new("Rex", "Mix")).await.unwrap();
        assert_eq!(created.key.local_id(), Some(5));
    }

    #[tokio::test]
    async fn test_create_ignores_input_id() {
        let dogs = local_client(vec![]);
        let mut input = Dog::new("Rex", "Mix");
        input.key = RecordKey::remote("65f1c2ab");
        let created = dogs.create(input).await.unwrap();
        assert_eq!(created.key, RecordKey::local(1));
    }

    #[tokio::test]
    async fn test_get_coerces_string_ids() {
        let dogs = local_client(Dog::seed());
        let dog = dogs.get(&RecordId::from("3")).await.unwrap();
        assert_eq!(dog.name, "Max");
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let dogs = local_client(Dog::seed());
        let error = dogs.get(&RecordId::Local(99)).await.unwrap_err();
        assert_eq!(error, ClientError::not_found("dog", 99u64));

        let error = dogs.get(&RecordId::from("65f1c2ab")).await.unwrap_err();
        assert!(error.is_not_found());
    }

    #[tokio::test]
    async fn test_list_returns_a_copy() {
        let dogs = local_client(Dog::seed());
        let mut listed = dogs.list().await.unwrap();
        listed[0].name = "Changed".to_string();
        listed.clear();

        let again = dogs.list().await.unwrap();
        assert_eq!(again.len(), 4);
        assert_eq!(again[0].name, "Buddy");
        assert_eq!(again[0].key.remote_id.as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn test_update_merges_and_preserves_id() {
        let dogs = local_client(Dog::seed());
        let before = dogs.get(&RecordId::Local(2)).await.unwrap();
        let patch = DogPatch {
            description: Some("House trained now".to_string()),
            ..DogPatch::default()
        };

        let updated = dogs.update(&RecordId::Local(2), &patch).await.unwrap();
        assert_eq!(updated.description, "House trained now");
        assert_eq!(updated.key, before.key);
        assert_eq!(updated.name, before.name);

        let fetched = dogs.get(&RecordId::Local(2)).await.unwrap();
        assert_eq!(fetched, updated);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let dogs = local_client(vec![]);
        let error = dogs
            .update(&RecordId::Local(1), &DogPatch::default())
            .await
            .unwrap_err();
        assert!(error.is_not_found());
    }

    #[tokio::test]
    async fn test_update_status() {
        let dogs = local_client(Dog::seed());
        let dog = dogs
            .update_status(&RecordId::Local(1), DogStatus::Adopted)
            .await
            .unwrap();
        assert_eq!(dog.status, DogStatus::Adopted);
        assert_eq!(dog.name, "Buddy");
    }

    #[tokio::test]
    async fn test_delete_is_terminal() {
        let dogs = local_client(Dog::seed());
        let ack = dogs.delete(&RecordId::from("1")).await.unwrap();
        assert_eq!(ack.id, RecordId::Local(1));

        assert!(dogs.get(&RecordId::Local(1)).await.unwrap_err().is_not_found());
        assert!(dogs.delete(&RecordId::Local(1)).await.unwrap_err().is_not_found());
        let ids: Vec<_> = dogs
            .list()
            .await
            .unwrap()
            .iter()
            .filter_map(|d| d.key.local_id())
            .collect();
        assert_eq!(ids, vec![2, 3, 4]);
    }

    #[tokio::test]
    async fn test_count_by_status() {
        let dogs = local_client(Dog::seed());
        let counts = dogs.count_by_status().await.unwrap();
        assert_eq!(counts.get("available"), Some(&2));
        assert_eq!(counts.get("pending"), Some(&1));
        assert_eq!(counts.get("adopted"), Some(&1));
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_unique_ids() {
        let dogs = local_client(vec![]);
        let (a, b, c) = tokio::join!(
            dogs.create(Dog::new("A", "Mix")),
            dogs.create(Dog::new("B", "Mix")),
            dogs.create(Dog::new("C", "Mix")),
        );
        let mut ids = vec![
            a.unwrap().key.local_id().unwrap(),
            b.unwrap().key.local_id().unwrap(),
            c.unwrap().key.local_id().unwrap(),
        ];
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_normalize_seed_fills_missing_and_duplicate_ids() {
        let mut first = Dog::new("A", "Mix");
        first.key = RecordKey::local(3);
        let mut duplicate = Dog::new("B", "Mix");
        duplicate.key = RecordKey::local(3);
        let mut remote = Dog::new("C", "Mix");
        remote.key = RecordKey::remote("65f1c2ab");

        let store = normalize_seed(vec![first, duplicate, remote, Dog::new("D", "Mix")]);
        let ids: Vec<_> = store.iter().filter_map(|d| d.key.local_id()).collect();
        assert_eq!(ids, vec![3, 4, 5, 6]);
        assert!(store.iter().all(|d| d.key.remote_id.is_some()));
    }
}
