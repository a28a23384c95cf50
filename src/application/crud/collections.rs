//! Synchronous CRUD on collections (spec §4.2, §6). Collection names must
//! be unique within a subscription (spec §3 invariant); creation enforces
//! that with `Conflict` (409).

use crate::application::registry::Registry;
use crate::domain::error::{Error, Result};
use crate::domain::types::Collection;
use uuid::Uuid;

pub struct CreateCollection<'a> {
    registry: &'a Registry,
}

impl<'a> CreateCollection<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    pub async fn execute(&self, collection: Collection) -> Result<Collection> {
        if self
            .registry
            .collection_store
            .get_by_subscription_and_name(collection.subscription_id, &collection.name)
            .await?
            .is_some()
        {
            return Err(Error::conflict(format!(
                "collection '{}' already exists for subscription {}",
                collection.name, collection.subscription_id
            )));
        }
        let subscription = self
            .registry
            .subscription_store
            .get(collection.subscription_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("subscription {}", collection.subscription_id)))?;

        if !collection.resource_type_ids.is_subset(&subscription.resource_type_ids) {
            return Err(Error::validation(format!(
                "collection '{}' names resource types not allowed by subscription {}",
                collection.name, collection.subscription_id
            )));
        }

        self.registry.collection_store.create(collection).await
    }
}

pub struct GetCollection<'a> {
    registry: &'a Registry,
}

impl<'a> GetCollection<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    pub async fn execute(&self, id: Uuid) -> Result<Option<Collection>> {
        self.registry.collection_store.get(id).await
    }
}

pub struct ListCollectionsForSubscription<'a> {
    registry: &'a Registry,
}

impl<'a> ListCollectionsForSubscription<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    pub async fn execute(&self, subscription_id: Uuid) -> Result<Vec<Collection>> {
        self.registry
            .subscription_store
            .get(subscription_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("subscription {subscription_id}")))?;
        self.registry.collection_store.list_for_subscription(subscription_id).await
    }
}

/// Cascades: every resource in the collection is deleted first, which
/// soft-deletes its graph node and deletes its chunks.
pub struct DeleteCollection<'a> {
    registry: &'a Registry,
}

impl<'a> DeleteCollection<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    pub async fn execute(&self, id: Uuid) -> Result<bool> {
        let resources = self.registry.resource_store.list_for_collection(id).await?;
        for resource in resources {
            super::resources::DeleteResource::new(self.registry)
                .execute(resource.id)
                .await?;
        }
        self.registry.collection_store.delete(id).await
    }
}
