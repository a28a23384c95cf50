//! Relational-style CRUD ports (spec §4.1): `ResourceStore`,
//! `CollectionStore`, `SubscriptionStore`, `ResourceTypeStore`.

use crate::domain::error::Result;
use crate::domain::types::{Collection, Resource, ResourceType, Subscription};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    async fn create(&self, subscription: Subscription) -> Result<Subscription>;
    async fn get(&self, id: Uuid) -> Result<Option<Subscription>>;
    async fn list(&self) -> Result<Vec<Subscription>>;
    async fn update(&self, subscription: Subscription) -> Result<Subscription>;
    /// Hard-delete the subscription. Returns `true` iff a row was removed.
    async fn delete(&self, id: Uuid) -> Result<bool>;
}
pub type SharedSubscriptionStore = Arc<dyn SubscriptionStore>;

#[async_trait]
pub trait ResourceTypeStore: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<ResourceType>>;
    async fn list(&self) -> Result<Vec<ResourceType>>;
}
pub type SharedResourceTypeStore = Arc<dyn ResourceTypeStore>;

#[async_trait]
pub trait CollectionStore: Send + Sync {
    async fn create(&self, collection: Collection) -> Result<Collection>;
    async fn get(&self, id: Uuid) -> Result<Option<Collection>>;
    async fn get_by_subscription_and_name(
        &self,
        subscription_id: Uuid,
        name: &str,
    ) -> Result<Option<Collection>>;
    async fn list_for_subscription(&self, subscription_id: Uuid) -> Result<Vec<Collection>>;
    /// Hard-delete the collection. Returns `true` iff a row was removed.
    async fn delete(&self, id: Uuid) -> Result<bool>;
}
pub type SharedCollectionStore = Arc<dyn CollectionStore>;

#[async_trait]
pub trait ResourceStore: Send + Sync {
    async fn create(&self, resource: Resource) -> Result<Resource>;
    async fn get(&self, id: Uuid) -> Result<Option<Resource>>;
    async fn list_for_collection(&self, collection_id: Uuid) -> Result<Vec<Resource>>;
    async fn count_for_collection(&self, collection_id: Uuid) -> Result<usize>;
    async fn set_file_type(&self, id: Uuid, file_type: String) -> Result<()>;

    /// Atomic read-modify-write: `updater` receives the current resource and
    /// returns the resource it should become. Implementations must apply
    /// this under a per-id lock so two concurrent stage invocations cannot
    /// race (spec §5 "per-entity serialisation").
    async fn update_if_changed(
        &self,
        id: Uuid,
        updater: Box<dyn FnOnce(Resource) -> Result<Resource> + Send>,
    ) -> Result<Resource>;

    /// Hard-delete the resource. Returns `true` iff a row was removed.
    async fn delete(&self, id: Uuid) -> Result<bool>;
}
pub type SharedResourceStore = Arc<dyn ResourceStore>;
