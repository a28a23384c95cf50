//! In-memory `SubscriptionStore`, `CollectionStore`, `ResourceTypeStore`,
//! and `ResourceStore` (spec §4.1). Sufficient to run the whole crate
//! without an external relational database — useful for tests and as the
//! default when no store is configured.

use crate::domain::error::{Error, Result};
use crate::domain::ports::{CollectionStore, ResourceStore, ResourceTypeStore, SubscriptionStore};
use crate::domain::types::{Collection, Resource, ResourceType, Subscription};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
pub struct InMemorySubscriptionStore {
    rows: DashMap<Uuid, Subscription>,
}

impl InMemorySubscriptionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubscriptionStore for InMemorySubscriptionStore {
    async fn create(&self, subscription: Subscription) -> Result<Subscription> {
        self.rows.insert(subscription.id, subscription.clone());
        Ok(subscription)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Subscription>> {
        Ok(self.rows.get(&id).map(|r| r.clone()))
    }

    async fn list(&self) -> Result<Vec<Subscription>> {
        Ok(self.rows.iter().map(|r| r.clone()).collect())
    }

    async fn update(&self, subscription: Subscription) -> Result<Subscription> {
        self.rows.insert(subscription.id, subscription.clone());
        Ok(subscription)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        Ok(self.rows.remove(&id).is_some())
    }
}

/// Seeded once at bootstrap; resource types are immutable after creation
/// (spec §3), so no write methods are exposed beyond construction.
#[derive(Default)]
pub struct InMemoryResourceTypeStore {
    rows: DashMap<Uuid, ResourceType>,
}

impl InMemoryResourceTypeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, resource_type: ResourceType) {
        self.rows.insert(resource_type.id, resource_type);
    }
}

#[async_trait]
impl ResourceTypeStore for InMemoryResourceTypeStore {
    async fn get(&self, id: Uuid) -> Result<Option<ResourceType>> {
        Ok(self.rows.get(&id).map(|r| r.clone()))
    }

    async fn list(&self) -> Result<Vec<ResourceType>> {
        Ok(self.rows.iter().map(|r| r.clone()).collect())
    }
}

#[derive(Default)]
pub struct InMemoryCollectionStore {
    rows: DashMap<Uuid, Collection>,
}

impl InMemoryCollectionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CollectionStore for InMemoryCollectionStore {
    async fn create(&self, collection: Collection) -> Result<Collection> {
        self.rows.insert(collection.id, collection.clone());
        Ok(collection)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Collection>> {
        Ok(self.rows.get(&id).map(|r| r.clone()))
    }

    async fn get_by_subscription_and_name(
        &self,
        subscription_id: Uuid,
        name: &str,
    ) -> Result<Option<Collection>> {
        Ok(self
            .rows
            .iter()
            .find(|r| r.subscription_id == subscription_id && r.name == name)
            .map(|r| r.clone()))
    }

    async fn list_for_subscription(&self, subscription_id: Uuid) -> Result<Vec<Collection>> {
        Ok(self
            .rows
            .iter()
            .filter(|r| r.subscription_id == subscription_id)
            .map(|r| r.clone())
            .collect())
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        Ok(self.rows.remove(&id).is_some())
    }
}

/// Guards read-modify-write with a per-id lock so `update_if_changed` is
/// atomic under concurrent duplicate delivery (spec §5 "per-entity
/// serialisation").
#[derive(Default)]
pub struct InMemoryResourceStore {
    rows: DashMap<Uuid, Resource>,
    locks: DashMap<Uuid, std::sync::Arc<Mutex<()>>>,
}

impl InMemoryResourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_for(&self, id: Uuid) -> std::sync::Arc<Mutex<()>> {
        self.locks.entry(id).or_insert_with(|| std::sync::Arc::new(Mutex::new(()))).clone()
    }
}

#[async_trait]
impl ResourceStore for InMemoryResourceStore {
    async fn create(&self, resource: Resource) -> Result<Resource> {
        self.rows.insert(resource.id, resource.clone());
        Ok(resource)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Resource>> {
        Ok(self.rows.get(&id).map(|r| r.clone()))
    }

    async fn list_for_collection(&self, collection_id: Uuid) -> Result<Vec<Resource>> {
        Ok(self
            .rows
            .iter()
            .filter(|r| r.collection_id == collection_id)
            .map(|r| r.clone())
            .collect())
    }

    async fn count_for_collection(&self, collection_id: Uuid) -> Result<usize> {
        Ok(self.rows.iter().filter(|r| r.collection_id == collection_id).count())
    }

    async fn set_file_type(&self, id: Uuid, file_type: String) -> Result<()> {
        let mut entry = self
            .rows
            .get_mut(&id)
            .ok_or_else(|| Error::not_found(format!("resource {id}")))?;
        entry.file_type = Some(file_type);
        Ok(())
    }

    async fn update_if_changed(
        &self,
        id: Uuid,
        updater: Box<dyn FnOnce(Resource) -> Result<Resource> + Send>,
    ) -> Result<Resource> {
        let lock = self.lock_for(id);
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());
        let current = self
            .rows
            .get(&id)
            .map(|r| r.clone())
            .ok_or_else(|| Error::not_found(format!("resource {id}")))?;
        let updated = updater(current)?;
        updated.check_invariants()?;
        self.rows.insert(id, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        Ok(self.rows.remove(&id).is_some())
    }
}
