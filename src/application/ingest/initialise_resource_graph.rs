//! Stage 2 (spec §4.2): resolves resource → collection → subscription and
//! upserts the `Subscription-[OWNS]->Collection-[CONTAINS]->Resource` chain.

use crate::application::registry::Registry;
use crate::domain::error::{Error, Result};
use crate::domain::ports::IngestStage;
use crate::domain::types::ResourceStatus;
use uuid::Uuid;

pub struct InitialiseResourceGraph<'a> {
    registry: &'a Registry,
}

impl<'a> InitialiseResourceGraph<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    pub async fn execute(&self, resource_id: Uuid) -> Result<()> {
        let resource = self
            .registry
            .resource_store
            .get(resource_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("resource {resource_id}")))?;

        if resource.file.as_ref().map(|f| f.is_empty()).unwrap_or(true) {
            return Err(Error::internal(format!(
                "resource {resource_id} has no file content at graph-init time"
            )));
        }
        if resource.file_type.is_none() {
            return Err(Error::internal(format!(
                "resource {resource_id} has no file_type at graph-init time"
            )));
        }

        let collection = self
            .registry
            .collection_store
            .get(resource.collection_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("collection {}", resource.collection_id)))?;

        let subscription = self
            .registry
            .subscription_store
            .get(collection.subscription_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("subscription {}", collection.subscription_id)))?;

        self.registry
            .graph_store
            .upsert_resource_node(&subscription, &collection, &resource)
            .await?;

        self.registry
            .resource_store
            .update_if_changed(
                resource_id,
                Box::new(|mut r| {
                    r.status = ResourceStatus::Graphed;
                    Ok(r)
                }),
            )
            .await?;

        self.registry
            .task_dispatch
            .enqueue(IngestStage::ExtractPlainText, resource_id)
            .await
    }
}
