//! Stage 4 (spec §4.2): resolves the resource type, runs its chunking
//! strategy, and persists chunk nodes. Idempotent — chunks already created
//! for a resource are left untouched (`GraphStore::chunks_for_resource`).

use crate::application::registry::Registry;
use crate::domain::error::{Error, Result};
use crate::domain::ports::IngestStage;
use crate::domain::types::ResourceStatus;
use uuid::Uuid;

pub struct ChunkResourceText<'a> {
    registry: &'a Registry,
}

impl<'a> ChunkResourceText<'a> {
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

        if resource.markdown_content.is_none() {
            return Err(Error::internal(format!(
                "resource {resource_id} has no markdown content to chunk"
            )));
        }

        let existing = self.registry.graph_store.chunks_for_resource(resource_id).await?;
        if existing.is_empty() {
            let resource_type = self
                .registry
                .resource_type_store
                .get(resource.resource_type_id)
                .await?
                .ok_or_else(|| Error::not_found(format!("resource type {}", resource.resource_type_id)))?;

            let chunks = self.registry.chunker.chunk(&resource_type, &resource).await?;
            self.registry.graph_store.create_chunk_nodes(&chunks).await?;
        }

        self.registry
            .resource_store
            .update_if_changed(
                resource_id,
                Box::new(|mut r| {
                    r.status = ResourceStatus::Chunked;
                    Ok(r)
                }),
            )
            .await?;

        self.registry
            .task_dispatch
            .enqueue(IngestStage::UpdateChunksWithEmbeddings, resource_id)
            .await
    }
}
