//! Resource upload (the synchronous half of the ingest pipeline's first
//! step) and the remaining resource CRUD (spec §4.2, §6). Upload validates,
//! persists the `pending` row, and enqueues `InitiateProcessing` — from
//! there the asynchronous pipeline takes over.

use crate::application::registry::Registry;
use crate::domain::error::{Error, Result};
use crate::domain::ports::IngestStage;
use crate::domain::types::{Resource, ResourceStatus};
use uuid::Uuid;

pub struct UploadResource<'a> {
    registry: &'a Registry,
}

impl<'a> UploadResource<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    pub async fn execute(&self, mut resource: Resource) -> Result<Resource> {
        if resource.file.as_ref().map(|f| f.is_empty()).unwrap_or(true) {
            return Err(Error::validation("resource upload has no file content"));
        }

        let collection = self
            .registry
            .collection_store
            .get(resource.collection_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("collection {}", resource.collection_id)))?;

        if !collection.resource_type_ids.contains(&resource.resource_type_id) {
            return Err(Error::validation(format!(
                "resource type {} is not allowed in collection {}",
                resource.resource_type_id, collection.id
            )));
        }

        resource.status = ResourceStatus::Pending;
        let created = self.registry.resource_store.create(resource).await?;

        self.registry
            .task_dispatch
            .enqueue(IngestStage::InitiateProcessing, created.id)
            .await?;

        Ok(created)
    }
}

pub struct GetResource<'a> {
    registry: &'a Registry,
}

impl<'a> GetResource<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    pub async fn execute(&self, id: Uuid) -> Result<Option<Resource>> {
        self.registry.resource_store.get(id).await
    }
}

pub struct ListResourcesForCollection<'a> {
    registry: &'a Registry,
}

impl<'a> ListResourcesForCollection<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    pub async fn execute(&self, collection_id: Uuid) -> Result<Vec<Resource>> {
        self.registry.resource_store.list_for_collection(collection_id).await
    }
}

/// Hard-deletes the relational row; soft-deletes (does not remove) the
/// graph node (spec §9 Open Question (b)).
pub struct DeleteResource<'a> {
    registry: &'a Registry,
}

impl<'a> DeleteResource<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    pub async fn execute(&self, id: Uuid) -> Result<bool> {
        self.registry.graph_store.soft_delete_resource(id).await?;
        self.registry.resource_store.delete(id).await
    }
}
